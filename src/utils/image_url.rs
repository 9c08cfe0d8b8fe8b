use crate::config::ImageConfig;

/// Rewrite an image URL from the backend for display. Behind a proxy the
/// backend origin is stripped so the image loads from the client's own
/// origin; otherwise the URL is used as is.
pub fn transform_image_url(image_url: &str, config: &ImageConfig) -> String {
    if !config.use_proxy {
        return image_url.to_string();
    }
    let origin = config.backend_origin.trim_end_matches('/');
    match image_url.strip_prefix(origin) {
        Some(rest) if !origin.is_empty() => rest.to_string(),
        _ => image_url.to_string(),
    }
}
