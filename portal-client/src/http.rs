//! HTTP client for network-based API calls
//!
//! 成功响应直接是 JSON 数据；失败响应是 `ApiResponse` 错误信封，
//! 统一还原为 [`ClientError::Api`]。

use crate::{
    ApiResponse, ClientConfig, ClientError, ClientResult, CurrentUserResponse, LoginResponse,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::gate::GateStatus;
use shared::models::{
    BulkDeleteRequest, BulkDeleteResponse, Company, CompanyCreate, CompanyFilter, CompanyName,
    CompanyNameCreate, CompanyNameImport, CompanyNameUpdate, CompanyStatusUpdate, CompanyUpdate,
    GroupCreate, GroupUpdate, GroupView, ImportSummary, LoginRequest, QueueEntry,
    RegistrationReceipt, RegistrationRequest, SeedResult, Translation, TranslationUpdate,
    UserCreate, UserInfo, WebsiteSettings, WebsiteSettingsUpdate,
};
use std::time::Duration;

/// `GET /health` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// HTTP client for making network requests to the portal server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Drop the stored token
    pub fn logout(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path)).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::POST, path)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::PATCH, path).json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(Into::into);
        }

        let envelope: ApiResponse<()> = serde_json::from_slice(&bytes).map_err(|_| {
            ClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            ))
        })?;
        match envelope.to_error() {
            Some(err) => Err(ClientError::Api(err)),
            None => Err(ClientError::InvalidResponse(format!(
                "HTTP {} without error code",
                status
            ))),
        }
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<Health> {
        self.get("/health").await
    }

    // ========== Auth API ==========

    /// Login with username and password, keeping the returned token
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/api/auth/login", &request).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.get("/api/auth/me").await
    }

    // ========== Users API ==========

    pub async fn list_users(&self) -> ClientResult<Vec<UserInfo>> {
        self.get("/api/users").await
    }

    pub async fn create_user(&self, user: &UserCreate) -> ClientResult<UserInfo> {
        self.post("/api/users", user).await
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/users/{}", id)).await
    }

    // ========== Settings API ==========

    pub async fn settings(&self) -> ClientResult<WebsiteSettings> {
        self.get("/api/settings/website").await
    }

    /// Gate decision evaluated on the server clock
    pub async fn gate_status(&self) -> ClientResult<GateStatus> {
        self.get("/api/settings/website/status").await
    }

    pub async fn update_settings(
        &self,
        update: &WebsiteSettingsUpdate,
    ) -> ClientResult<WebsiteSettings> {
        self.put("/api/settings/website", update).await
    }

    // ========== Groups API ==========

    /// Upcoming groups that still have free slots
    pub async fn public_groups(&self) -> ClientResult<Vec<GroupView>> {
        self.get("/api/groups/public").await
    }

    pub async fn public_groups_all(&self) -> ClientResult<Vec<GroupView>> {
        self.get("/api/groups/public/all").await
    }

    pub async fn list_groups(&self) -> ClientResult<Vec<GroupView>> {
        self.get("/api/groups").await
    }

    pub async fn get_group(&self, id: &str) -> ClientResult<GroupView> {
        self.get(&format!("/api/groups/{}", id)).await
    }

    pub async fn create_group(&self, group: &GroupCreate) -> ClientResult<GroupView> {
        self.post("/api/groups", group).await
    }

    pub async fn update_group(&self, id: &str, update: &GroupUpdate) -> ClientResult<GroupView> {
        self.put(&format!("/api/groups/{}", id), update).await
    }

    pub async fn delete_group(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/groups/{}", id)).await
    }

    // ========== Pre-registration API ==========

    pub async fn pre_register(
        &self,
        request: &RegistrationRequest,
    ) -> ClientResult<RegistrationReceipt> {
        self.post("/api/pre-register", request).await
    }

    pub async fn registration(&self, id: &str) -> ClientResult<RegistrationReceipt> {
        self.get(&format!("/api/pre-register/{}", id)).await
    }

    /// Resolve a registration code to its directory entry
    pub async fn lookup_code(&self, code: &str) -> ClientResult<CompanyName> {
        self.get(&format!("/api/pre-register/by-code/{}", code)).await
    }

    // ========== Companies API ==========

    pub async fn public_queue(&self) -> ClientResult<Vec<QueueEntry>> {
        self.get("/api/companies/public-queue").await
    }

    pub async fn list_companies(&self, filter: &CompanyFilter) -> ClientResult<Vec<Company>> {
        self.get_with_query("/api/companies", filter).await
    }

    pub async fn get_company(&self, id: &str) -> ClientResult<Company> {
        self.get(&format!("/api/companies/{}", id)).await
    }

    pub async fn create_company(&self, company: &CompanyCreate) -> ClientResult<Company> {
        self.post("/api/companies", company).await
    }

    pub async fn update_company(&self, id: &str, update: &CompanyUpdate) -> ClientResult<Company> {
        self.put(&format!("/api/companies/{}", id), update).await
    }

    pub async fn update_company_status(
        &self,
        id: &str,
        update: &CompanyStatusUpdate,
    ) -> ClientResult<Company> {
        self.patch(&format!("/api/companies/{}/status", id), update).await
    }

    pub async fn delete_company(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/companies/{}", id)).await
    }

    pub async fn bulk_delete_companies(
        &self,
        ids: Vec<String>,
    ) -> ClientResult<BulkDeleteResponse> {
        self.post("/api/companies/bulk-delete", &BulkDeleteRequest { ids })
            .await
    }

    // ========== Company directory API ==========

    pub async fn list_company_names(&self) -> ClientResult<Vec<CompanyName>> {
        self.get("/api/company-names").await
    }

    /// Directory entries without a matching company
    pub async fn unregistered_company_names(&self) -> ClientResult<Vec<CompanyName>> {
        self.get("/api/company-names/unregistered").await
    }

    pub async fn get_company_name(&self, id: &str) -> ClientResult<CompanyName> {
        self.get(&format!("/api/company-names/{}", id)).await
    }

    pub async fn create_company_name(
        &self,
        entry: &CompanyNameCreate,
    ) -> ClientResult<CompanyName> {
        self.post("/api/company-names", entry).await
    }

    pub async fn update_company_name(
        &self,
        id: &str,
        update: &CompanyNameUpdate,
    ) -> ClientResult<CompanyName> {
        self.put(&format!("/api/company-names/{}", id), update).await
    }

    pub async fn delete_company_name(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/company-names/{}", id)).await
    }

    pub async fn import_company_names(
        &self,
        import: &CompanyNameImport,
    ) -> ClientResult<ImportSummary> {
        self.post("/api/company-names/import", import).await
    }

    // ========== Translations API ==========

    pub async fn translations(&self) -> ClientResult<Vec<Translation>> {
        self.get("/api/translations").await
    }

    pub async fn translation(&self, lang: &str) -> ClientResult<Translation> {
        self.get(&format!("/api/translations/{}", lang)).await
    }

    pub async fn update_translation(
        &self,
        lang: &str,
        update: &TranslationUpdate,
    ) -> ClientResult<Translation> {
        self.put(&format!("/api/translations/{}", lang), update).await
    }

    pub async fn seed_translations(&self) -> ClientResult<SeedResult> {
        self.post_empty("/api/translations/seed").await
    }
}
