//! Procedural PDF renderer for quote documents.
//!
//! Draws the branded A4 layout: dark background, colored header band with
//! decorative dots, rounded info boxes, two-column feature list, timeline and
//! technology panels, deliverables, legal notes and a footer with page-number
//! stamps on every page. The dots are the only non-deterministic element and
//! can be pinned with an explicit seed.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::branding::BrandingAssets;
use super::catalog::Theme;
use super::content::QuoteContent;
use super::DocumentError;

const PAGE_W: f64 = 210.0;
const PAGE_H: f64 = 297.0;

const BG: (u8, u8, u8) = (10, 10, 26);
const PANEL: (u8, u8, u8) = (30, 30, 60);
const MUTED: (u8, u8, u8) = (200, 200, 200);
const FOOTER_TEXT: (u8, u8, u8) = (180, 180, 180);
const STAMP: (u8, u8, u8) = (150, 150, 150);
const WHITE: (u8, u8, u8) = (255, 255, 255);

const HEADER_DOTS: usize = 5;
const FOOTER_DOTS: usize = 5;

/// Render the document to PDF bytes.
///
/// `seed` pins the decorative dot positions for deterministic output.
pub fn render_quote_pdf(
    content: &QuoteContent,
    theme: &Theme,
    branding: &BrandingAssets,
    seed: Option<u64>,
) -> Result<Vec<u8>, DocumentError> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let (doc, page_idx, layer_idx) =
        PdfDocument::new("Preventivo Strelka", mm(PAGE_W), mm(PAGE_H), "Content");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DocumentError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DocumentError::Font(e.to_string()))?;

    let pages = vec![(page_idx, layer_idx)];
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    // Page background and header band.
    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    fill_rect(&layer, 0.0, 0.0, PAGE_W, 40.0, theme.primary);
    for _ in 0..HEADER_DOTS {
        let x = rng.gen_range(0.0..PAGE_W);
        let y = rng.gen_range(0.0..40.0);
        let r = rng.gen_range(0.1..0.6);
        fill_dot(&layer, x, y, r, WHITE);
    }

    // Logo: embedded image when a real asset is available, wordmark otherwise.
    let mut logo_drawn = false;
    if let Some(bytes) = branding.logo() {
        logo_drawn = embed_logo(&layer, bytes);
        if !logo_drawn {
            log::warn!("Branding logo could not be embedded, using text wordmark");
        }
    }
    if !logo_drawn {
        text(&layer, &bold, "STRELKA", 20.0, 20.0, 25.0, WHITE);
    }

    text_centered(
        &layer,
        &bold,
        &content.project_heading,
        16.0,
        PAGE_W / 2.0,
        25.0,
        WHITE,
    );

    // Accent rule under the header.
    stroke_line(&layer, 20.0, 45.0, 190.0, 45.0, theme.accent, 0.3);

    // Reference and date box.
    fill_rect(&layer, 15.0, 50.0, 180.0, 28.0, PANEL);
    text(&layer, &bold, "RIFERIMENTO", 11.0, 20.0, 60.0, theme.accent);
    text(&layer, &regular, &content.reference, 12.0, 20.0, 70.0, WHITE);
    text(&layer, &bold, "DATA", 11.0, 120.0, 60.0, theme.accent);
    text(&layer, &regular, &content.issued_on, 12.0, 120.0, 70.0, WHITE);
    fill_dot(&layer, 172.0, 64.0, 9.0, dim(theme.primary));

    // Client information.
    fill_rect(&layer, 15.0, 84.0, 180.0, 38.0, PANEL);
    text(&layer, &bold, "INFORMAZIONI CLIENTE", 14.0, 20.0, 94.0, theme.accent);
    text(&layer, &regular, "Nome:", 10.0, 20.0, 104.0, MUTED);
    text(&layer, &regular, "Email:", 10.0, 20.0, 114.0, MUTED);
    text(&layer, &regular, "Telefono:", 10.0, 120.0, 104.0, MUTED);
    text(&layer, &regular, "Budget:", 10.0, 120.0, 114.0, MUTED);
    text(&layer, &regular, &content.client.name, 10.0, 50.0, 104.0, WHITE);
    text(&layer, &regular, &content.client.email, 10.0, 50.0, 114.0, WHITE);
    text(&layer, &regular, &content.client.phone, 10.0, 150.0, 104.0, WHITE);
    text(&layer, &regular, &content.client.budget, 10.0, 150.0, 114.0, WHITE);

    // Project description, wrapped; the box holds four lines.
    fill_rect(&layer, 15.0, 128.0, 180.0, 36.0, PANEL);
    text(&layer, &bold, "DESCRIZIONE PROGETTO", 14.0, 20.0, 138.0, theme.accent);
    for (i, line) in content.description_lines.iter().take(4).enumerate() {
        text(&layer, &regular, line, 10.0, 20.0, 146.0 + i as f64 * 5.0, WHITE);
    }

    // Features in two columns on a tinted panel.
    fill_rect(&layer, 15.0, 170.0, 180.0, 42.0, dim(theme.primary));
    text(&layer, &bold, "CARATTERISTICHE INCLUSE", 14.0, 20.0, 180.0, theme.accent);
    for (i, feature) in content.feature_columns.0.iter().enumerate() {
        bullet(&layer, &regular, feature, 9.0, 20.0, 190.0 + i as f64 * 6.0);
    }
    for (i, feature) in content.feature_columns.1.iter().enumerate() {
        bullet(&layer, &regular, feature, 9.0, 110.0, 190.0 + i as f64 * 6.0);
    }

    // Timeline and technologies, side by side.
    fill_rect(&layer, 15.0, 218.0, 85.0, 26.0, PANEL);
    fill_rect(&layer, 110.0, 218.0, 85.0, 26.0, PANEL);
    text(&layer, &bold, "TEMPISTICHE", 12.0, 20.0, 227.0, theme.accent);
    text(&layer, &regular, &content.timeline, 10.0, 20.0, 237.0, WHITE);
    text(&layer, &bold, "TECNOLOGIE", 12.0, 115.0, 227.0, theme.accent);
    for (i, tech) in content.technologies.iter().enumerate() {
        bullet(&layer, &regular, tech, 8.0, 115.0, 233.0 + i as f64 * 4.0);
    }

    // Deliverables, two per column.
    fill_rect(&layer, 15.0, 248.0, 180.0, 22.0, PANEL);
    text(&layer, &bold, "DELIVERABLES", 14.0, 20.0, 256.0, theme.accent);
    for (i, deliverable) in content.deliverables.iter().take(4).enumerate() {
        let x = if i < 2 { 20.0 } else { 110.0 };
        let y = 262.0 + (i % 2) as f64 * 5.0;
        bullet(&layer, &regular, deliverable, 9.0, x, y);
    }

    // Legal notes above the footer band.
    for (i, note) in content.legal_notes.iter().enumerate() {
        text(&layer, &regular, note, 9.0, 20.0, 272.0 + i as f64 * 3.5, MUTED);
    }

    // Footer band with decorative dots and contact lines.
    fill_rect(&layer, 0.0, 280.0, PAGE_W, 17.0, PANEL);
    for _ in 0..FOOTER_DOTS {
        let x = rng.gen_range(0.0..PAGE_W);
        let y = rng.gen_range(280.0..PAGE_H);
        let r = rng.gen_range(0.1..0.4);
        fill_dot(&layer, x, y, r, WHITE);
    }
    for (i, line) in content.footer_lines.iter().enumerate() {
        text_centered(
            &layer,
            &regular,
            line,
            8.0,
            PAGE_W / 2.0,
            286.0 + i as f64 * 5.0,
            FOOTER_TEXT,
        );
    }

    // Page-number stamp on every page.
    let total = pages.len();
    for (i, (p, l)) in pages.iter().enumerate() {
        let stamp_layer = doc.get_page(*p).get_layer(*l);
        text(
            &stamp_layer,
            &regular,
            &format!("Pagina {} di {}", i + 1, total),
            8.0,
            180.0,
            294.0,
            STAMP,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| DocumentError::Render(e.to_string()))
}

fn mm(v: f64) -> Mm {
    Mm(v as _)
}

fn color(c: (u8, u8, u8)) -> Color {
    let r = f64::from(c.0) / 255.0;
    let g = f64::from(c.1) / 255.0;
    let b = f64::from(c.2) / 255.0;
    Color::Rgb(Rgb::new(r as _, g as _, b as _, None))
}

/// Darkened variant of a theme color, used where the original layered the
/// primary color at reduced opacity over the dark background.
fn dim(c: (u8, u8, u8)) -> (u8, u8, u8) {
    (c.0 / 4 + 8, c.1 / 4 + 8, c.2 / 4 + 15)
}

/// Filled axis-aligned rectangle; `y_top` measured from the top edge.
fn fill_rect(layer: &PdfLayerReference, x: f64, y_top: f64, w: f64, h: f64, c: (u8, u8, u8)) {
    layer.set_fill_color(color(c));
    let bottom = PAGE_H - y_top - h;
    let top = PAGE_H - y_top;
    let points = vec![
        (Point::new(mm(x), mm(bottom)), false),
        (Point::new(mm(x + w), mm(bottom)), false),
        (Point::new(mm(x + w), mm(top)), false),
        (Point::new(mm(x), mm(top)), false),
    ];
    layer.add_shape(Line {
        points,
        is_closed: true,
        has_fill: true,
        has_stroke: false,
        is_clipping_path: false,
    });
}

/// Filled dot approximated by a 12-gon; `y_top` measured from the top edge.
fn fill_dot(layer: &PdfLayerReference, x: f64, y_top: f64, radius: f64, c: (u8, u8, u8)) {
    layer.set_fill_color(color(c));
    let cy = PAGE_H - y_top;
    let n = 12;
    let points = (0..n)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / n as f64;
            (
                Point::new(mm(x + radius * a.cos()), mm(cy + radius * a.sin())),
                false,
            )
        })
        .collect();
    layer.add_shape(Line {
        points,
        is_closed: true,
        has_fill: true,
        has_stroke: false,
        is_clipping_path: false,
    });
}

fn stroke_line(
    layer: &PdfLayerReference,
    x1: f64,
    y1_top: f64,
    x2: f64,
    y2_top: f64,
    c: (u8, u8, u8),
    thickness: f64,
) {
    layer.set_outline_color(color(c));
    layer.set_outline_thickness(thickness as _);
    let points = vec![
        (Point::new(mm(x1), mm(PAGE_H - y1_top)), false),
        (Point::new(mm(x2), mm(PAGE_H - y2_top)), false),
    ];
    layer.add_shape(Line {
        points,
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    });
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    value: &str,
    size: f64,
    x: f64,
    y_top: f64,
    c: (u8, u8, u8),
) {
    layer.set_fill_color(color(c));
    layer.use_text(value, size as _, mm(x), mm(PAGE_H - y_top), font);
}

/// Centered text; width estimated from the average Helvetica glyph advance.
fn text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    value: &str,
    size: f64,
    center_x: f64,
    y_top: f64,
    c: (u8, u8, u8),
) {
    let width_mm = value.chars().count() as f64 * size * 0.5 * 0.3528;
    text(layer, font, value, size, center_x - width_mm / 2.0, y_top, c);
}

fn bullet(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    value: &str,
    size: f64,
    x: f64,
    y_top: f64,
) {
    text(layer, font, "\u{2022}", size, x, y_top, WHITE);
    text(layer, font, value, size, x + 4.0, y_top, WHITE);
}

/// Attempt to decode and place the logo in the header. Any decode failure is
/// reported as `false` so the caller can fall back to the wordmark.
fn embed_logo(layer: &PdfLayerReference, bytes: &[u8]) -> bool {
    use printpdf::image_crate::codecs::jpeg::JpegDecoder;
    use printpdf::image_crate::codecs::png::PngDecoder;
    use printpdf::{Image, ImageTransform};

    let image = if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        PngDecoder::new(std::io::Cursor::new(bytes))
            .ok()
            .and_then(|d| Image::try_from(d).ok())
    } else {
        JpegDecoder::new(std::io::Cursor::new(bytes))
            .ok()
            .and_then(|d| Image::try_from(d).ok())
    };

    match image {
        Some(img) => {
            img.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(20.0)),
                    translate_y: Some(mm(PAGE_H - 24.0)),
                    dpi: Some(300.0),
                    ..Default::default()
                },
            );
            true
        }
        None => false,
    }
}
