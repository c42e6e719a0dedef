use super::error::ImportError;
use super::pipeline::{sample_template, SampleFormat};
use super::session::{submit, UploadSession, UploadState};
use crate::domain::a001_product::api::SharedProductApi;
use crate::shared::config::AppConfig;
use crate::shared::excel_importer::{parse_upload, read_file_bytes, ParsedRows, ACCEPT};
use crate::shared::export::{download_url, export_to_csv};
use crate::shared::icons::icon;
use crate::shared::modal::LoadingOverlay;
use crate::shared::notification::Notification;
use contracts::domain::a001_product::Product;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// Сколько строк показывать в предпросмотре
const PREVIEW_ROWS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Work {
    Fetch,
    Parse,
    Save,
}

/// Счётчики незавершённых асинхронных операций диалога.
/// Оверлей снимается только когда завершились все.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PendingWork {
    fetches: u32,
    parses: u32,
    saves: u32,
}

impl PendingWork {
    fn counter(&mut self, work: Work) -> &mut u32 {
        match work {
            Work::Fetch => &mut self.fetches,
            Work::Parse => &mut self.parses,
            Work::Save => &mut self.saves,
        }
    }

    fn begin(&mut self, work: Work) {
        *self.counter(work) += 1;
    }

    fn finish(&mut self, work: Work) {
        let counter = self.counter(work);
        *counter = counter.saturating_sub(1);
    }

    fn is_busy(&self) -> bool {
        self.fetches + self.parses + self.saves > 0
    }

    /// Сохранять нельзя, пока файл разбирается или идёт прошлое сохранение
    fn blocks_save(&self) -> bool {
        self.parses + self.saves > 0
    }
}

#[component]
pub fn CollectionsImport(
    /// Товары для выпадающего списка
    #[prop(into)]
    products: Signal<Vec<Product>>,
    api: SharedProductApi,
    config: AppConfig,
    /// Вызывается после успешного сохранения
    on_refresh: Callback<()>,
    /// Общий флаг занятости: пока true, модальное окно нельзя закрыть
    busy: RwSignal<bool>,
) -> impl IntoView {
    let session = RwSignal::new(UploadSession::new());
    let notice = RwSignal::new(Option::<Notification>::None);
    let product_value = RwSignal::new(String::new());

    let pending = RwSignal::new(PendingWork::default());
    Effect::new(move |_| busy.set(pending.with(PendingWork::is_busy)));

    let api = StoredValue::new_local(api);
    let images = config.images.clone();
    let samples = config.samples.clone();

    let file_input = NodeRef::<html::Input>::new();
    let sample_select = NodeRef::<html::Select>::new();

    let show_error = move |err: ImportError| notice.set(Some(err.into()));

    // Выбор товара: сразу подгружаем карточку, чтобы было что экспортировать
    Effect::new(move |_| {
        let product_id = product_value.get();
        session.update(|s| s.set_product_id(&product_id));
        if product_id.is_empty() {
            return;
        }

        let api = api.get_value();
        pending.update(|p| p.begin(Work::Fetch));
        spawn_local(async move {
            let result = api.fetch_product(&product_id).await;
            pending.update(|p| p.finish(Work::Fetch));
            match result {
                Ok(product) => {
                    session.update(|s| {
                        s.set_product(&product_id, product);
                    });
                }
                Err(e) => {
                    log::error!("Failed to load product {}: {}", product_id, e);
                    show_error(ImportError::ProductLoad(e));
                }
            }
        });
    });

    let on_sample_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let Some(format) = SampleFormat::parse(&value) else {
            return;
        };
        let (href, file_name) = sample_template(format, &samples);
        if let Err(e) = download_url(&href, &file_name) {
            log::error!("Failed to download sample {}: {}", href, e);
        }
        if let Some(select) = sample_select.get() {
            select.set_value("");
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        notice.set(None);
        let name = file.name();
        let selected = session.try_update(|s| s.select_file(&name, &file.type_(), file.size() as u64));
        let kind = match selected {
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                input.set_value("");
                show_error(e);
                return;
            }
            None => return,
        };

        pending.update(|p| p.begin(Work::Parse));
        spawn_local(async move {
            let result = match read_file_bytes(&file).await {
                Ok(bytes) => parse_upload(kind, bytes),
                Err(e) => Err(e),
            };
            pending.update(|p| p.finish(Work::Parse));
            if let Some(Err(e)) = session.try_update(|s| s.complete_parse(result)) {
                show_error(e);
            }
        });
    };

    let on_remove = move |_| {
        session.update(|s| s.remove_upload());
        notice.set(None);
        if let Some(input) = file_input.get() {
            input.set_value("");
        }
    };

    let on_export = move |_| {
        let exported = session.with_untracked(|s| s.export_rows());
        match exported {
            Ok((file_name, rows)) => {
                if let Err(e) = export_to_csv(&rows, &file_name) {
                    log::error!("Failed to export collection: {}", e);
                    notice.set(Some(Notification::error("Failed to export collection.")));
                }
            }
            Err(e) => show_error(e),
        }
    };

    let on_save = move |_| {
        if pending.with_untracked(PendingWork::blocks_save) {
            return;
        }
        notice.set(None);

        let request = match session.try_update(|s| s.prepare_save(&images)) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                show_error(e);
                return;
            }
            None => return,
        };

        let api = api.get_value();
        pending.update(|p| p.begin(Work::Save));
        spawn_local(async move {
            let result = submit(api.as_ref(), &request).await;
            session.update(|s| s.finish_save(&result));
            pending.update(|p| p.finish(Work::Save));
            match result {
                Ok(done) => {
                    on_refresh.run(());
                    done.present();
                }
                Err(e) => show_error(e),
            }
        });
    };

    let has_product = move || session.with(|s| !s.product_id().is_empty());
    let is_saving = move || busy.get() || session.with(|s| s.state() == UploadState::Validating);

    view! {
        <div class="collections-import">
            <div class="collections-import__toolbar">
                <div class="form__group">
                    <label class="form__label">"Product"</label>
                    <Select value=product_value>
                        <option value="">"-- Select product --"</option>
                        <For
                            each=move || selectable_products(products.get())
                            key=|p| p.id.clone()
                            children=move |p: Product| {
                                view! { <option value=p.id.clone()>{p.name.clone()}</option> }
                            }
                        />
                    </Select>
                </div>

                <div class="form__group">
                    <label class="form__label">"Sample file"</label>
                    <select class="form__select" node_ref=sample_select on:change=on_sample_change>
                        <option value="">"Download sample"</option>
                        <option value="csv">"CSV"</option>
                        <option value="excel">"Excel"</option>
                    </select>
                </div>

                <Show when=has_product>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_export>
                        {icon("download")}
                        " Export collection"
                    </Button>
                </Show>
            </div>

            <div class="collections-import__filebar">
                <label class="button button--primary" for="collections-file-input">
                    {icon("upload")}
                    " Choose file"
                </label>
                <input
                    id="collections-file-input"
                    type="file"
                    accept=ACCEPT
                    class="hidden"
                    node_ref=file_input
                    on:change=on_file_change
                />
                {move || session.with(|s| match s.file() {
                    Some(file) => {
                        let label = format!("{} ({})", file.name, file.size_label());
                        view! {
                            <span class="collections-import__fileinfo">
                                {icon("file")}
                                <strong>{label}</strong>
                                <button class="button button--icon" title="Remove file" on:click=on_remove>
                                    {icon("x")}
                                </button>
                            </span>
                        }
                        .into_any()
                    }
                    None => view! { <span class="collections-import__filehint">"No file selected"</span> }.into_any(),
                })}
            </div>

            {move || notice.get().map(|n| {
                let class = if n.is_error() {
                    "warning-box warning-box--error"
                } else {
                    "warning-box warning-box--success"
                };
                view! {
                    <div class=class>
                        <span class="warning-box__text">{n.message}</span>
                    </div>
                }
            })}

            {move || session.with(|s| s.parsed().map(preview_table))}

            <div class="collections-import__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_save
                    disabled=Signal::derive(is_saving)
                >
                    "Add collections"
                </Button>
            </div>

            <LoadingOverlay visible=Signal::derive(move || busy.get()) />
        </div>
    }
}

/// В списке выбора только товары с `_id`: без него нечего сохранять
fn selectable_products(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|p| !p.id.trim().is_empty()).collect()
}

fn preview_table(parsed: &ParsedRows) -> AnyView {
    let rows = parsed.row_set();
    let headers = rows.headers.clone();
    let total = rows.len();

    let body: Vec<_> = rows
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| {
            let cells: Vec<_> = headers
                .iter()
                .map(|h| {
                    let text = row.get(h).map(|v| v.to_string()).unwrap_or_default();
                    view! { <td class="table__cell">{text}</td> }
                })
                .collect();
            view! { <tr class="table__row">{cells}</tr> }
        })
        .collect();

    let head: Vec<_> = headers
        .iter()
        .map(|h| view! { <th class="table__header-cell">{h.clone()}</th> })
        .collect();

    let caption = if total > PREVIEW_ROWS {
        format!("Showing {} of {} rows", PREVIEW_ROWS, total)
    } else {
        format!("{} rows", total)
    };

    view! {
        <div class="collections-import__preview">
            <div class="collections-import__caption">{caption}</div>
            <div class="table-container">
                <table class="table__data">
                    <thead class="table__head">
                        <tr>{head}</tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_finishing_mid_parse_keeps_busy() {
        let mut pending = PendingWork::default();
        pending.begin(Work::Parse);
        pending.begin(Work::Fetch);
        pending.finish(Work::Fetch);

        assert!(pending.is_busy());
        assert!(pending.blocks_save());

        pending.finish(Work::Parse);
        assert!(!pending.is_busy());
        assert!(!pending.blocks_save());
    }

    #[test]
    fn test_products_without_id_are_not_selectable() {
        let products = vec![
            Product {
                id: "p1".to_string(),
                ..Default::default()
            },
            Product::default(),
        ];
        let ids: Vec<String> = selectable_products(products)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[test]
    fn test_overlapping_fetches() {
        let mut pending = PendingWork::default();
        pending.begin(Work::Fetch);
        pending.begin(Work::Fetch);
        pending.finish(Work::Fetch);
        assert!(pending.is_busy());
        assert!(!pending.blocks_save());

        pending.finish(Work::Fetch);
        pending.finish(Work::Fetch);
        assert_eq!(pending, PendingWork::default());
    }
}
