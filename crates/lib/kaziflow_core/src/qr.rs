//! QR code rendering for invoices.
//!
//! Invoices carry a scannable `kaziflow://invoice/{id}` payload, stored as
//! an SVG data URL alongside the row.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;
use qrcode::types::QrError;
use uuid::Uuid;

/// Render the QR code for an invoice id as a `data:image/svg+xml` URL.
pub fn invoice_qr_data_url(invoice_id: Uuid) -> Result<String, QrError> {
    let payload = format!("kaziflow://invoice/{invoice_id}");
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
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
    fn renders_a_data_url() {
        let id = Uuid::new_v4();
        let url = invoice_qr_data_url(id).unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn payload_embeds_the_invoice_id() {
        let id = Uuid::new_v4();
        let url = invoice_qr_data_url(id).unwrap();
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg_bytes = STANDARD.decode(encoded).unwrap();
        let svg_text = String::from_utf8(svg_bytes).unwrap();
        assert!(svg_text.starts_with("<?xml") || svg_text.starts_with("<svg"));
    }

    #[test]
    fn distinct_invoices_get_distinct_codes() {
        let a = invoice_qr_data_url(Uuid::new_v4()).unwrap();
        let b = invoice_qr_data_url(Uuid::new_v4()).unwrap();
        assert_ne!(a, b);
    }
}
