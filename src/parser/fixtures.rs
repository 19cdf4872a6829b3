/// Builds a minimal two-page PDF with one line of Helvetica text per page.
/// The pages put their line at different heights so extractors see a line
/// break between them.
pub fn two_page_pdf(first: &str, second: &str) -> Vec<u8> {
    let page = |contents: usize| {
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 7 0 R >> >> /Contents {} 0 R >>",
            contents
        )
    };
    let stream = |y: u32, text: &str| {
        let body = format!("BT /F1 12 Tf 72 {} Td ({}) Tj ET", y, text);
        format!("<< /Length {} >>\nstream\n{}\nendstream", body.len(), body)
    };

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >>".to_string(),
        page(5),
        page(6),
        stream(700, first),
        stream(500, second),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", idx + 1, object));
    }

    let xref = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    ));

    pdf.into_bytes()
}
