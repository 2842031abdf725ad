//! Printable receipts
//!
//! Receipts are HTML pages rendered with Tera. Each one embeds a QR code of
//! the cloth id as inline SVG and a print button wired to the browser's own
//! print dialog; print styles hide the button.

use crate::config::BusinessConfig;
use crate::core::error::Result;
use crate::core::format::{format_inr, format_long_date};
use crate::core::listing::InventoryStats;
use crate::core::record::InventoryRecord;
use chrono::{FixedOffset, Utc};
use qrcode::QrCode;
use qrcode::render::svg;
use serde::Serialize;
use tera::{Context, Tera};

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const RECEIPT_TEMPLATE: &str = include_str!("../../templates/receipt.html");
const NOT_FOUND_TEMPLATE: &str = include_str!("../../templates/not_found.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// Edge length of the rendered QR code, in pixels
const QR_SIZE: u32 = 120;

#[derive(Serialize)]
struct ReceiptContext<'a> {
    business_name: &'a str,
    tagline: &'a str,
    cloth_id: &'a str,
    category: &'a str,
    cloth_age: u32,
    date: &'a str,
    owner_name: &'a str,
    owner_mobile: &'a str,
    purchase_price: String,
    rental_price: Option<String>,
    resale_price: Option<String>,
    generated_on: String,
    qr_svg: String,
}

/// Renders receipts, the not-found page and the dashboard
pub struct ReceiptRenderer {
    tera: Tera,
    business: BusinessConfig,
    offset: FixedOffset,
}

impl ReceiptRenderer {
    pub fn new(business: BusinessConfig, offset: FixedOffset) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("receipt.html", RECEIPT_TEMPLATE),
            ("not_found.html", NOT_FOUND_TEMPLATE),
            ("dashboard.html", DASHBOARD_TEMPLATE),
        ])?;
        Ok(Self {
            tera,
            business,
            offset,
        })
    }

    /// QR code of `cloth_id` as a standalone SVG document
    pub fn qr_svg(&self, cloth_id: &str) -> Result<String> {
        let code = QrCode::new(cloth_id.as_bytes())?;
        Ok(code
            .render::<svg::Color<'_>>()
            .min_dimensions(QR_SIZE, QR_SIZE)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .quiet_zone(false)
            .build())
    }

    /// QR code SVG with the XML prolog stripped, for embedding in HTML
    fn inline_qr_svg(&self, cloth_id: &str) -> Result<String> {
        let document = self.qr_svg(cloth_id)?;
        Ok(match document.find("<svg") {
            Some(start) => document[start..].to_string(),
            None => document,
        })
    }

    /// Full printable receipt for one record
    pub fn render_receipt(&self, record: &InventoryRecord) -> Result<String> {
        let context = ReceiptContext {
            business_name: &self.business.name,
            tagline: &self.business.tagline,
            cloth_id: &record.cloth_id,
            category: record.cloth_category.as_str(),
            cloth_age: record.cloth_age,
            date: &record.date,
            owner_name: &record.owner_name,
            owner_mobile: &record.owner_mobile,
            purchase_price: format_inr(record.purchase_price),
            rental_price: record.rental_price.map(format_inr),
            resale_price: record.resale_price.map(format_inr),
            generated_on: format_long_date(Utc::now(), self.offset),
            qr_svg: self.inline_qr_svg(&record.cloth_id)?,
        };
        Ok(self
            .tera
            .render("receipt.html", &Context::from_serialize(&context)?)?)
    }

    /// Page shown when a receipt address names no record
    pub fn render_not_found(&self) -> Result<String> {
        let mut context = Context::new();
        context.insert("business_name", &self.business.name);
        Ok(self.tera.render("not_found.html", &context)?)
    }

    /// Landing page with the headline statistics
    pub fn render_dashboard(&self, stats: &InventoryStats) -> Result<String> {
        let mut context = Context::new();
        context.insert("business_name", &self.business.name);
        context.insert("tagline", &self.business.tagline);
        context.insert("stats", stats);
        context.insert("total_value", &stats.total_purchase_value_display());
        Ok(self.tera.render("dashboard.html", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClothCategory;

    fn renderer() -> ReceiptRenderer {
        ReceiptRenderer::new(
            BusinessConfig::default(),
            FixedOffset::east_opt(330 * 60).unwrap(),
        )
        .unwrap()
    }

    fn record() -> InventoryRecord {
        InventoryRecord {
            cloth_id: "LUX-EVG-1760000000123-042".to_string(),
            owner_name: "Asha <Rao>".to_string(),
            owner_mobile: "9876543210".to_string(),
            cloth_category: ClothCategory::EveningGown,
            cloth_age: 6,
            purchase_price: 150000,
            rental_price: Some(2500),
            resale_price: None,
            date: "9 October 2025".to_string(),
            created_at: "2025-10-09T08:53:20.123Z".to_string(),
        }
    }

    #[test]
    fn test_receipt_contains_all_fields() {
        let html = renderer().render_receipt(&record()).unwrap();

        assert!(html.contains("LUX-EVG-1760000000123-042"));
        assert!(html.contains("Evening Gown"));
        assert!(html.contains("6 months"));
        assert!(html.contains("9 October 2025"));
        assert!(html.contains("9876543210"));
        assert!(html.contains("₹1,50,000"));
        assert!(html.contains("Rental Price:"));
        assert!(!html.contains("Resale Price:"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("<?xml"));
    }

    #[test]
    fn test_receipt_escapes_user_input() {
        let html = renderer().render_receipt(&record()).unwrap();
        assert!(html.contains("Asha &lt;Rao&gt;"));
        assert!(!html.contains("Asha <Rao>"));
    }

    #[test]
    fn test_qr_svg_is_svg_document() {
        let svg = renderer().qr_svg("LUX-CDR-1-001").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_not_found_page() {
        let html = renderer().render_not_found().unwrap();
        assert!(html.contains("Receipt Not Found"));
    }

    #[test]
    fn test_dashboard_shows_totals() {
        let stats = InventoryStats::compute(&[record()]);
        let html = renderer().render_dashboard(&stats).unwrap();
        assert!(html.contains("Total Value"));
        assert!(html.contains("₹1,50,000"));
    }
}
