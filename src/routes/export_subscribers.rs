use crate::{
    domain::{ExportRequest, ListId, ListIdValidationError, PageSize, PageSizeValidationError},
    moosend_client::{MoosendError, Subscriber},
    MoosendClient,
};

use {
    actix_web::{
        http::{header, StatusCode},
        web, HttpResponse, ResponseError,
    },
    anyhow::Context,
    chrono::Utc,
    secrecy::Secret,
};

/// Raw query parameters. Every field is optional so that validation, and the
/// exact error message each failure produces, happens in one place below
/// rather than inside the extractor.
#[derive(serde::Deserialize, Debug)]
pub struct Parameters {
    listid: Option<String>,
    pagesize: Option<String>,
    apikey: Option<Secret<String>>,
}

impl TryFrom<Parameters> for ExportRequest {
    type Error = ExportError;

    fn try_from(params: Parameters) -> Result<Self, Self::Error> {
        let list_id = ListId::parse(params.listid.unwrap_or_default())?;
        let page_size = match params.pagesize {
            Some(raw) => PageSize::parse(raw)?,
            None => PageSize::default(),
        };
        let api_key = params
            .apikey
            .unwrap_or_else(|| Secret::new(String::new()));
        Ok(ExportRequest {
            list_id,
            page_size,
            api_key,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    MissingListId(#[from] ListIdValidationError),
    #[error("{0}")]
    InvalidPageSize(#[from] PageSizeValidationError),
    #[error("Failed to fetch subscribers from the Moosend API")]
    Upstream(#[from] MoosendError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ResponseError for ExportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExportError::MissingListId(_) | ExportError::InvalidPageSize(_) => {
                StatusCode::BAD_REQUEST
            }
            ExportError::Upstream(_) | ExportError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ExportError::MissingListId(_) | ExportError::InvalidPageSize(_) => self.to_string(),
            // The caller only ever sees an opaque message; the specific
            // upstream failure stays in the server logs.
            ExportError::Upstream(_) | ExportError::Unexpected(_) => {
                "Error fetching from Moosend API".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[tracing::instrument(
    name = "Exporting subscribed members to CSV",
    skip(params, moosend_client),
    fields(
        listid = ?params.listid,
        pagesize = ?params.pagesize,
    )
)]
pub async fn export_subscribers(
    params: web::Query<Parameters>,
    moosend_client: web::Data<MoosendClient>,
) -> Result<HttpResponse, ExportError> {
    let request: ExportRequest = params.0.try_into()?;

    let subscribers = fetch_all_pages(&moosend_client, &request)
        .await
        .map_err(|error| {
            tracing::error!(error.cause_chain = ?error, "Error fetching from Moosend API");
            error
        })?;

    let csv = serialize_to_csv(&subscribers)?;

    let filename = format!(
        "subscribers_{}_{}.csv",
        request.list_id,
        Utc::now().timestamp_millis()
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        ))
        .body(csv))
}

#[tracing::instrument(
    name = "Fetching all pages of subscribed members",
    skip(moosend_client, request),
    fields(listid = %request.list_id, pagesize = %request.page_size)
)]
async fn fetch_all_pages(
    moosend_client: &MoosendClient,
    request: &ExportRequest,
) -> Result<Vec<Subscriber>, MoosendError> {
    let mut subscribers = Vec::new();
    let mut current_page = 1;
    let mut total_pages = 1;

    while current_page <= total_pages {
        let page = moosend_client
            .fetch_subscribed_page(
                &request.list_id,
                &request.api_key,
                current_page,
                request.page_size,
            )
            .await?;

        subscribers.extend(page.subscribers);
        // The total is re-read from every page, so the loop always runs
        // against the upstream's most recent count.
        total_pages = page.paging.total_page_count;
        current_page += 1;
    }

    tracing::debug!(
        "Fetched {} subscribed members across {} pages",
        subscribers.len(),
        current_page - 1
    );

    Ok(subscribers)
}

fn serialize_to_csv(subscribers: &[Subscriber]) -> Result<String, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["ID", "Email"])
        .context("Failed to write the CSV header row")?;
    for subscriber in subscribers {
        writer
            .write_record([subscriber.id.as_str(), subscriber.email.as_str()])
            .context("Failed to write a subscriber CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush the CSV writer: {}", e))?;
    String::from_utf8(bytes).context("The CSV output was not valid UTF-8")
}
