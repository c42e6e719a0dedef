use crate::shared::api_utils::{join_url, resolve_api_base};
use async_trait::async_trait;
use contracts::domain::a001_product::Product;
use contracts::usecases::u501_import_collections::{
    ApiResult, DeleteProductRequest, ProductQuery, UpdateCollectionRequest,
};
use gloo_net::http::{Request, Response};
use std::rc::Rc;

pub const GET_PRODUCTS_PATH: &str = "/api/product/get-products";
pub const UPDATE_COLLECTION_PATH: &str = "/api/product/update-collection";
pub const DELETE_PRODUCT_PATH: &str = "/api/product/delete/";

/// Product endpoints of the catalog backend.
///
/// Errors are transport-level only; a `success: false` answer is a valid
/// [`ApiResult`].
#[async_trait(?Send)]
pub trait ProductApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, String>;

    async fn fetch_product(&self, product_id: &str) -> Result<Product, String>;

    async fn update_collection(
        &self,
        request: &UpdateCollectionRequest,
    ) -> Result<ApiResult, String>;

    async fn delete_product(&self, request: &DeleteProductRequest) -> Result<ApiResult, String>;
}

pub type SharedProductApi = Rc<dyn ProductApi>;

#[derive(Debug, Clone)]
pub struct HttpProductApi {
    base_url: String,
}

impl HttpProductApi {
    pub fn new(configured_base_url: &str) -> Self {
        Self {
            base_url: resolve_api_base(configured_base_url),
        }
    }

    fn products_url(&self, query: &ProductQuery) -> Result<String, String> {
        let url = join_url(&self.base_url, GET_PRODUCTS_PATH);
        let qs = serde_qs::to_string(query)
            .map_err(|e| format!("Failed to build query string: {}", e))?;
        Ok(if qs.is_empty() {
            url
        } else {
            format!("{}?{}", url, qs)
        })
    }

    async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<ApiResult, String> {
        let response = Request::post(&join_url(&self.base_url, path))
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        read_api_result(response).await
    }
}

/// The backend answers `{success, message}` even with an error status,
/// so the body wins over the status code when it parses.
async fn read_api_result(response: Response) -> Result<ApiResult, String> {
    let status = response.status();
    let ok = response.ok();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    match serde_json::from_str::<ApiResult>(&text) {
        Ok(result) => Ok(result),
        Err(_) if !ok => Err(format!("HTTP {}", status)),
        Err(e) => Err(format!("Failed to parse response: {}", e)),
    }
}

#[async_trait(?Send)]
impl ProductApi for HttpProductApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, String> {
        let url = self.products_url(&ProductQuery::default())?;
        let response = Request::get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(format!("Failed to fetch products: {}", response.status()));
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Product, String> {
        let url = self.products_url(&ProductQuery {
            product_id: Some(product_id.to_string()),
        })?;
        let response = Request::get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(format!("Failed to fetch product: {}", response.status()));
        }

        response
            .json::<Product>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    async fn update_collection(
        &self,
        request: &UpdateCollectionRequest,
    ) -> Result<ApiResult, String> {
        self.post_json(UPDATE_COLLECTION_PATH, request).await
    }

    async fn delete_product(&self, request: &DeleteProductRequest) -> Result<ApiResult, String> {
        self.post_json(DELETE_PRODUCT_PATH, request).await
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory [`ProductApi`] that records every mutating call

    use super::*;
    use std::cell::RefCell;

    pub struct RecordingApi {
        pub products: Vec<Product>,
        pub update_response: Result<ApiResult, String>,
        pub delete_response: Result<ApiResult, String>,
        pub updates: RefCell<Vec<UpdateCollectionRequest>>,
        pub deletes: RefCell<Vec<DeleteProductRequest>>,
    }

    impl Default for RecordingApi {
        fn default() -> Self {
            Self {
                products: Vec::new(),
                update_response: Ok(ApiResult {
                    success: true,
                    message: None,
                }),
                delete_response: Ok(ApiResult {
                    success: true,
                    message: None,
                }),
                updates: RefCell::new(Vec::new()),
                deletes: RefCell::new(Vec::new()),
            }
        }
    }

    impl RecordingApi {
        pub fn with_products(products: Vec<Product>) -> Self {
            Self {
                products,
                ..Default::default()
            }
        }

        pub fn network_calls(&self) -> usize {
            self.updates.borrow().len() + self.deletes.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl ProductApi for RecordingApi {
        async fn fetch_products(&self) -> Result<Vec<Product>, String> {
            Ok(self.products.clone())
        }

        async fn fetch_product(&self, product_id: &str) -> Result<Product, String> {
            self.products
                .iter()
                .find(|p| p.id == product_id)
                .cloned()
                .ok_or_else(|| "Failed to fetch product: 404".to_string())
        }

        async fn update_collection(
            &self,
            request: &UpdateCollectionRequest,
        ) -> Result<ApiResult, String> {
            self.updates.borrow_mut().push(request.clone());
            self.update_response.clone()
        }

        async fn delete_product(
            &self,
            request: &DeleteProductRequest,
        ) -> Result<ApiResult, String> {
            self.deletes.borrow_mut().push(request.clone());
            self.delete_response.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_url() {
        let api = HttpProductApi {
            base_url: "http://localhost:3000".to_string(),
        };
        assert_eq!(
            api.products_url(&ProductQuery::default()).unwrap(),
            "http://localhost:3000/api/product/get-products"
        );
        assert_eq!(
            api.products_url(&ProductQuery {
                product_id: Some("p1".to_string()),
            })
            .unwrap(),
            "http://localhost:3000/api/product/get-products?product_id=p1"
        );
    }

    #[test]
    fn test_default_config_uses_relative_urls() {
        let config = crate::shared::config::AppConfig::default();
        let api = HttpProductApi::new(&config.api.base_url);
        assert_eq!(
            api.products_url(&ProductQuery::default()).unwrap(),
            "/api/product/get-products"
        );
        assert_eq!(
            join_url(&api.base_url, DELETE_PRODUCT_PATH),
            "/api/product/delete/"
        );
    }
}
