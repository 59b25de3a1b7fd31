//! Order tracking QR code
//!
//! Each created order gets a scannable code encoding the public tracking
//! URL, rendered as an SVG data URL and stored on the order.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use qrcode::QrCode;
use qrcode::render::svg;

use shared::error::ApiError;

/// Public tracking URL for an order
pub fn order_tracking_url(frontend_url: &str, order_number: &str) -> String {
    format!(
        "{}/pedido/{}",
        frontend_url.trim_end_matches('/'),
        order_number
    )
}

/// Render the tracking URL as a QR code data URL
pub fn render_data_url(url: &str) -> Result<String, ApiError> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| ApiError::internal(format!("QR code generation failed: {}", e)))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_url_joins_cleanly() {
        assert_eq!(
            order_tracking_url("http://localhost:3000", "RFL000007"),
            "http://localhost:3000/pedido/RFL000007"
        );
        assert_eq!(
            order_tracking_url("https://refugio.com.br/", "RFL000007"),
            "https://refugio.com.br/pedido/RFL000007"
        );
    }

    #[test]
    fn renders_an_svg_data_url() {
        let data_url = render_data_url("http://localhost:3000/pedido/RFL000001").unwrap();
        assert!(data_url.starts_with("data:image/svg+xml;base64,"));

        let payload = data_url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = STANDARD.decode(payload).unwrap();
        let svg_text = String::from_utf8(decoded).unwrap();
        assert!(svg_text.contains("<svg"));
    }
}
