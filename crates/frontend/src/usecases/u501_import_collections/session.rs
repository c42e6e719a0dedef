use super::error::ImportError;
use super::pipeline;
use crate::domain::a001_product::api::ProductApi;
use crate::shared::config::ImageConfig;
use crate::shared::excel_importer::{parse_upload, ParsedRows, SelectedFile, UploadKind};
use crate::shared::notification::Notification;
use contracts::domain::a001_product::Product;
use contracts::usecases::u501_import_collections::{CollectionRow, UpdateCollectionRequest};

pub const SAVED_MESSAGE: &str = "Product collection updated Successfully";

/// Состояние одной сессии загрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected,
    Parsing,
    Parsed,
    ParseError,
    Validating,
    Saved,
    ValidationError,
    SaveError,
}

/// Данные диалога импорта: выбранный товар, файл и разобранные строки.
///
/// Сетевые вызовы делаются снаружи (см. [`submit`]), поэтому сессию можно
/// держать в сигнале и менять синхронно.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    state: UploadState,
    product_id: String,
    product: Option<Product>,
    file: Option<SelectedFile>,
    parsed: Option<ParsedRows>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn parsed(&self) -> Option<&ParsedRows> {
        self.parsed.as_ref()
    }

    fn transition(&mut self, next: UploadState) {
        log::debug!("upload session: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Выбор товара. Загруженная ранее карточка сбрасывается до ответа сервера.
    pub fn set_product_id(&mut self, product_id: &str) {
        self.product_id = product_id.trim().to_string();
        self.product = None;
    }

    /// Принять карточку товара, запрошенную по `requested_id`.
    ///
    /// Ответ для уже не выбранного товара игнорируется. Сравнивается id
    /// запроса: бэкенд может вернуть запись без `_id`, тогда он берётся
    /// из запроса.
    pub fn set_product(&mut self, requested_id: &str, mut product: Product) -> bool {
        let requested_id = requested_id.trim();
        if requested_id != self.product_id {
            log::debug!(
                "ignoring product {} (selected: {})",
                requested_id,
                self.product_id
            );
            return false;
        }
        if product.id.is_empty() {
            product.id = requested_id.to_string();
        }
        self.product = Some(product);
        true
    }

    pub async fn select_product(
        &mut self,
        api: &dyn ProductApi,
        product_id: &str,
    ) -> Result<(), ImportError> {
        self.set_product_id(product_id);
        if self.product_id.is_empty() {
            return Ok(());
        }
        let product = api.fetch_product(&self.product_id).await.map_err(|e| {
            log::error!("Failed to load product {}: {}", self.product_id, e);
            ImportError::ProductLoad(e)
        })?;
        let requested_id = self.product_id.clone();
        self.set_product(&requested_id, product);
        Ok(())
    }

    /// Проверка типа файла. Отклонённый файл не трогает текущие данные сессии.
    pub fn select_file(
        &mut self,
        name: &str,
        mime: &str,
        size: u64,
    ) -> Result<UploadKind, ImportError> {
        let Some(kind) = UploadKind::detect(mime, name) else {
            log::warn!("Rejected upload {} with type {:?}", name, mime);
            return Err(ImportError::InvalidFileType {
                mime: mime.to_string(),
            });
        };

        self.file = Some(SelectedFile {
            name: name.to_string(),
            size,
            kind,
        });
        self.transition(UploadState::FileSelected);
        self.transition(UploadState::Parsing);
        Ok(kind)
    }

    /// Результат разбора заменяет предыдущие строки целиком
    pub fn complete_parse(
        &mut self,
        result: Result<ParsedRows, String>,
    ) -> Result<usize, ImportError> {
        match result {
            Ok(parsed) => {
                let count = parsed.len();
                log::info!(
                    "Parsed {} rows from {}",
                    count,
                    self.file.as_ref().map(|f| f.name.as_str()).unwrap_or("upload")
                );
                self.parsed = Some(parsed);
                self.transition(UploadState::Parsed);
                Ok(count)
            }
            Err(e) => {
                log::error!("Error reading file: {}", e);
                self.parsed = None;
                self.transition(UploadState::ParseError);
                Err(ImportError::Parse(e))
            }
        }
    }

    /// Выбор и разбор файла за один шаг, когда байты уже прочитаны
    pub fn accept_upload(
        &mut self,
        name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<usize, ImportError> {
        let kind = self.select_file(name, mime, bytes.len() as u64)?;
        self.complete_parse(parse_upload(kind, bytes))
    }

    pub fn remove_upload(&mut self) {
        self.file = None;
        self.parsed = None;
        self.transition(UploadState::Idle);
    }

    /// Проверки перед сохранением и сборка запроса. Ошибка здесь означает,
    /// что сетевой вызов делать нельзя.
    pub fn prepare_save(
        &mut self,
        images: &ImageConfig,
    ) -> Result<UpdateCollectionRequest, ImportError> {
        self.transition(UploadState::Validating);
        match self.validated_request(images) {
            Ok(request) => Ok(request),
            Err(e) => {
                log::warn!("Collection import rejected: {}", e);
                self.transition(UploadState::ValidationError);
                Err(e)
            }
        }
    }

    fn validated_request(&self, images: &ImageConfig) -> Result<UpdateCollectionRequest, ImportError> {
        if self.product_id.is_empty() {
            return Err(ImportError::NoProductSelected);
        }

        let rows = match &self.parsed {
            Some(parsed) if !parsed.is_empty() => parsed.row_set(),
            _ => return Err(ImportError::NoRows),
        };

        let missing = pipeline::missing_headers(rows);
        if !missing.is_empty() {
            return Err(ImportError::MissingHeaders(missing));
        }

        Ok(UpdateCollectionRequest {
            id: self.product_id.clone(),
            collections: pipeline::build_collection(rows, images, pipeline::new_item_id),
        })
    }

    pub fn finish_save(&mut self, result: &Result<Notification, ImportError>) {
        match result {
            Ok(_) => self.transition(UploadState::Saved),
            Err(_) => self.transition(UploadState::SaveError),
        }
    }

    pub async fn save(
        &mut self,
        api: &dyn ProductApi,
        images: &ImageConfig,
    ) -> Result<Notification, ImportError> {
        let request = self.prepare_save(images)?;
        let result = submit(api, &request).await;
        self.finish_save(&result);
        result
    }

    /// Имя файла и строки для выгрузки коллекции выбранного товара
    pub fn export_rows(&self) -> Result<(String, Vec<CollectionRow>), ImportError> {
        if self.product_id.is_empty() {
            return Err(ImportError::NoProductSelected);
        }
        let product = self.product.as_ref().ok_or(ImportError::NoProductSelected)?;
        Ok((
            pipeline::export_file_name(product),
            pipeline::export_rows(product),
        ))
    }
}

/// Отправка коллекции на бэкенд
pub async fn submit(
    api: &dyn ProductApi,
    request: &UpdateCollectionRequest,
) -> Result<Notification, ImportError> {
    let response = api.update_collection(request).await.map_err(|e| {
        log::error!("Error handling file data: {}", e);
        ImportError::Transport(e)
    })?;

    if response.success {
        log::info!(
            "Updated collection of product {} ({} items)",
            request.id,
            request.collections.len()
        );
        Ok(Notification::success(SAVED_MESSAGE).with_reload())
    } else {
        log::warn!(
            "Backend rejected collection update for {}: {:?}",
            request.id,
            response.message
        );
        Err(ImportError::rejected(response.message))
    }
}
