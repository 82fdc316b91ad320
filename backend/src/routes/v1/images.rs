use tracing::instrument;

/// Placeholder for the image gallery; only records the request
#[instrument]
pub async fn get_images() {
    tracing::info!("Handle Images - GET request");
}
