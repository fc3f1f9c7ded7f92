use reqwest::Method;

use super::approvals::encode_segment;
use super::client::ApiClient;
use super::types::{
    ApiError, CreateVacationRequest, EmployeeRequest, RequestKind, RequestListResponse,
};

fn pending_params(
    status: Option<&str>,
    kind: Option<RequestKind>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = status {
        params.push(("status", status.to_string()));
    }
    if let Some(kind) = kind {
        params.push(("kind", kind.as_str().to_string()));
    }
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    if let Some(per_page) = per_page {
        params.push(("per_page", per_page.to_string()));
    }
    params
}

impl ApiClient {
    pub async fn list_pending_requests(
        &self,
        status: Option<&str>,
        kind: Option<RequestKind>,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<RequestListResponse, ApiError> {
        let headers = self.auth_headers()?;
        let base_url = self.resolved_base_url();
        let params = pending_params(status, kind, page, per_page);
        let mut request = self
            .http_client()
            .get(format!("{}/requests/pending", base_url))
            .headers(headers);
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        self.map_json_response(Method::GET, response).await
    }

    pub async fn get_request(&self, id: &str) -> Result<EmployeeRequest, ApiError> {
        let headers = self.auth_headers()?;
        let base_url = self.resolved_base_url();
        let response = self
            .http_client()
            .get(format!("{}/requests/{}", base_url, encode_segment(id)))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        self.map_json_response(Method::GET, response).await
    }

    pub async fn create_vacation_request(
        &self,
        payload: CreateVacationRequest,
    ) -> Result<EmployeeRequest, ApiError> {
        let headers = self.auth_headers()?;
        let base_url = self.resolved_base_url();
        let response = self
            .http_client()
            .post(format!("{}/requests/vacation", base_url))
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        self.map_json_response(Method::POST, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_params_skip_missing_values() {
        let params = pending_params(None, None, None, None);
        assert!(params.is_empty());
    }

    #[test]
    fn pending_params_include_filters() {
        let params = pending_params(Some("pending"), Some(RequestKind::Vacation), Some(2), Some(50));
        assert!(params.contains(&("status", "pending".to_string())));
        assert!(params.contains(&("kind", "vacation".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("per_page", "50".to_string())));
    }
}
