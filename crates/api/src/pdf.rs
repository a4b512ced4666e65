//! PDF rendering of invoice snapshots.
//!
//! Renders the enriched invoice view into a downloadable A4 document. The
//! field order and fallback values are part of the externally observable
//! contract: company header, invoice number (or `FAC-<id>` when unset),
//! issue date, client name and email, project name if present, description
//! if present, amount, status label, and payment date if paid.
//!
//! Rendering reads an immutable snapshot: it never mutates invoice state.

use nomade_core::invoicing::{fallback_invoice_number, InvoiceStatus};
use nomade_db::models::invoice::InvoiceDetail;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 18.0;
const MARGIN_TOP: f32 = 25.0;
const MARGIN_BOTTOM: f32 = 25.0;
/// X position of the right-hand column (number, date, total).
const RIGHT_COLUMN: f32 = 140.0;
/// Maximum characters per wrapped description line at 11pt Helvetica.
const WRAP_WIDTH: usize = 80;

const COMPANY_NAME: &str = "Tecnica Nomade";
const COMPANY_TAGLINE: &str = "Sistemas de Riego";

/// Render an invoice snapshot into PDF bytes.
pub fn render_invoice(invoice: &InvoiceDetail) -> Result<Vec<u8>, printpdf::Error> {
    let number = invoice
        .invoice_number
        .clone()
        .unwrap_or_else(|| fallback_invoice_number(invoice.id));

    let (doc, page, layer) = PdfDocument::new(
        format!("Factura {number}"),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let first_layer = doc.get_page(page).get_layer(layer);

    // Fixed header block: company identity, document title, number and date.
    first_layer.use_text(COMPANY_NAME, 24.0, Mm(MARGIN_LEFT), Mm(272.0), &bold);
    first_layer.use_text(COMPANY_TAGLINE, 12.0, Mm(MARGIN_LEFT), Mm(264.0), &regular);
    first_layer.use_text("FACTURA", 20.0, Mm(MARGIN_LEFT), Mm(246.0), &bold);
    first_layer.use_text(
        format!("Numero: {number}"),
        10.0,
        Mm(RIGHT_COLUMN),
        Mm(250.0),
        &regular,
    );
    first_layer.use_text(
        format!("Fecha: {}", invoice.issued_at.format("%d/%m/%Y")),
        10.0,
        Mm(RIGHT_COLUMN),
        Mm(244.0),
        &regular,
    );

    // Flowing body: continues onto extra pages when content overflows.
    let mut writer = InvoiceWriter {
        doc: &doc,
        layer: first_layer,
        cursor: 228.0,
    };

    writer.line("Cliente:", 12.0, MARGIN_LEFT, &bold, 6.0);
    writer.line(&invoice.client_name, 11.0, MARGIN_LEFT, &regular, 5.5);
    writer.line(&invoice.client_email, 10.0, MARGIN_LEFT, &regular, 9.0);

    if let Some(project_name) = &invoice.project_name {
        writer.line("Proyecto:", 12.0, MARGIN_LEFT, &bold, 6.0);
        writer.line(project_name, 11.0, MARGIN_LEFT, &regular, 9.0);
    }

    if let Some(description) = &invoice.description {
        writer.line("Descripcion:", 12.0, MARGIN_LEFT, &bold, 6.0);
        for line in wrap_text(description, WRAP_WIDTH) {
            writer.line(&line, 11.0, MARGIN_LEFT, &regular, 5.5);
        }
        writer.space(3.5);
    }

    writer.space(6.0);
    writer.line("Total:", 16.0, RIGHT_COLUMN, &bold, 8.0);
    writer.line(
        &format!("${:.2}", invoice.amount),
        20.0,
        RIGHT_COLUMN,
        &bold,
        12.0,
    );

    writer.line(
        &format!("Estado: {}", status_label(invoice.status)),
        12.0,
        MARGIN_LEFT,
        &regular,
        6.0,
    );
    if let Some(paid_at) = invoice.paid_at {
        writer.line(
            &format!("Fecha de pago: {}", paid_at.format("%d/%m/%Y")),
            10.0,
            MARGIN_LEFT,
            &regular,
            6.0,
        );
    }

    // Footer on the last page.
    writer.layer.use_text(
        format!("{COMPANY_NAME} - {COMPANY_TAGLINE}"),
        8.0,
        Mm(78.0),
        Mm(14.0),
        &regular,
    );

    doc.save_to_bytes()
}

/// Spanish display label for an invoice status.
fn status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Pending => "Pendiente",
        InvoiceStatus::Paid => "Pagada",
        InvoiceStatus::Cancelled => "Cancelada",
    }
}

/// Top-down text flow over one or more pages.
struct InvoiceWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
}

impl InvoiceWriter<'_> {
    /// Write one line at `x`, then advance the cursor by `advance` mm,
    /// starting a fresh page first when the line would not fit.
    fn line(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        if self.cursor - advance < MARGIN_BOTTOM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN_TOP;
        }
        self.layer.use_text(text, size, Mm(x), Mm(self.cursor), font);
        self.cursor -= advance;
    }

    /// Advance the cursor without writing.
    fn space(&mut self, advance: f32) {
        self.cursor -= advance;
    }
}

/// Greedy word wrap at `max_chars` characters per line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
