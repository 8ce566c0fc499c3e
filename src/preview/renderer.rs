//! Deterministic letter document renderer.
//!
//! Turns a [`LetterViewModel`] into the fixed section sequence used by the
//! on-screen preview. The section order and the omission rules mirror the
//! store's PDF template, so what the user previews is structurally what the
//! exported PDF contains.

use serde::Serialize;
use utoipa::ToSchema;

use crate::preview::assembler::LetterViewModel;

const GREETING: &str = "Kepada Yth,";
const OPENING: &str = "Dengan hormat,";
const CC_HEADING: &str = "Tembusan:";

/// One signatory column in the sign-off block. A column without a signature
/// image still reserves the same vertical space so names stay aligned.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SignatureColumn {
    pub position: String,
    pub signature_image: Option<String>,
    pub name: String,
}

/// A rendered document section. Sections appear in a fixed order; optional
/// sections are omitted entirely rather than emitted empty.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum DocumentSection {
    Header {
        company_name: String,
        motto: Option<String>,
        logo: Option<String>,
        address: String,
        contact_line: String,
        website_line: Option<String>,
    },
    Metadata {
        letter_number: String,
        date: String,
        attachments_line: Option<String>,
        subject: String,
    },
    Salutation {
        greeting: String,
        recipient_name: String,
        recipient_position: Option<String>,
        recipient_address: Option<String>,
    },
    Opening {
        text: String,
    },
    Body {
        paragraphs: Vec<String>,
    },
    Closing {
        text: String,
    },
    Signatures {
        columns: Vec<SignatureColumn>,
    },
    CarbonCopies {
        heading: String,
        entries: Vec<String>,
    },
}

/// The full rendered document: an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LetterDocument {
    pub sections: Vec<DocumentSection>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Render a view model into the document section sequence.
///
/// Pure function of its input: the same view model always yields the same
/// document, for both preview and export parity.
pub fn render(vm: &LetterViewModel) -> LetterDocument {
    let letter = &vm.letter;
    let company = &vm.company;
    let mut sections = Vec::new();

    sections.push(DocumentSection::Header {
        company_name: company.name.clone(),
        motto: company.motto.as_deref().and_then(non_empty),
        logo: company.logo.as_deref().and_then(non_empty),
        address: company.address.clone(),
        contact_line: format!("Tel: {} | Email: {}", company.phone, company.email),
        website_line: company
            .website
            .as_deref()
            .and_then(non_empty)
            .map(|site| format!("Website: {}", site)),
    });

    let attachments_line = if letter.attachments_count > 0 {
        Some(format!("{} berkas", letter.attachments_count))
    } else {
        None
    };
    sections.push(DocumentSection::Metadata {
        letter_number: letter.letter_number.clone(),
        date: letter.date.to_string(),
        attachments_line,
        subject: letter.subject.clone(),
    });

    // The salutation block always renders with its greeting and the name
    // slot; position and address lines appear only when they carry text.
    // Address line breaks are preserved as entered.
    sections.push(DocumentSection::Salutation {
        greeting: GREETING.to_string(),
        recipient_name: letter.recipient_name.clone(),
        recipient_position: letter.recipient_position.as_deref().and_then(non_empty),
        recipient_address: letter.recipient_address.as_deref().and_then(non_empty),
    });

    sections.push(DocumentSection::Opening {
        text: OPENING.to_string(),
    });

    sections.push(DocumentSection::Body {
        paragraphs: vm.paragraphs.clone(),
    });

    if let Some(text) = letter.letter_type.closing_sentence() {
        sections.push(DocumentSection::Closing {
            text: text.to_string(),
        });
    }

    if !letter.signatories.is_empty() {
        let columns = letter
            .signatories
            .iter()
            .map(|sig| SignatureColumn {
                position: sig.position.clone(),
                signature_image: sig.signature_image.as_deref().and_then(non_empty),
                name: sig.name.clone(),
            })
            .collect();
        sections.push(DocumentSection::Signatures { columns });
    }

    if !vm.cc_lines.is_empty() {
        sections.push(DocumentSection::CarbonCopies {
            heading: CC_HEADING.to_string(),
            entries: vm.cc_lines.iter().map(|line| format!("- {}", line)).collect(),
        });
    }

    LetterDocument { sections }
}

const PREVIEW_STYLE: &str = "\
body { font-family: 'Times New Roman', serif; margin: 40px; color: #1e293b; }\n\
.header { text-align: center; border-bottom: 2px solid #1e293b; padding-bottom: 12px; margin-bottom: 20px; }\n\
.header h1 { margin: 0; font-size: 24px; }\n\
.header .motto { font-style: italic; margin: 2px 0; }\n\
.header p { margin: 2px 0; font-size: 13px; }\n\
.header img { width: 64px; height: 64px; object-fit: contain; vertical-align: middle; margin-right: 12px; }\n\
.metadata p, .salutation p { margin: 2px 0; }\n\
.body p { text-align: justify; margin: 10px 0; }\n\
.signatures { display: flex; justify-content: space-around; gap: 16px; margin-top: 32px; }\n\
.signature-col { text-align: center; min-width: 200px; }\n\
.signature-space { height: 64px; margin: 16px auto; }\n\
img.signature-space { object-fit: contain; display: block; }\n\
.signature-name { border-top: 1px solid #1e293b; padding-top: 8px; }\n\
.cc { border-top: 1px solid #cbd5e1; margin-top: 24px; padding-top: 12px; }\n\
.cc p { margin: 2px 0; font-size: 13px; }\n\
.address { white-space: pre-wrap; }\n";

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl LetterDocument {
    /// Render the document as a standalone HTML page for the preview dialog.
    /// All user text is escaped; image references go into `src` attributes
    /// untouched apart from attribute escaping.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Preview Surat</title>\n<style>\n");
        html.push_str(PREVIEW_STYLE);
        html.push_str("</style>\n</head>\n<body>\n");

        for section in &self.sections {
            match section {
                DocumentSection::Header {
                    company_name,
                    motto,
                    logo,
                    address,
                    contact_line,
                    website_line,
                } => {
                    html.push_str("<div class=\"header\">\n");
                    if let Some(logo) = logo {
                        html.push_str(&format!(
                            "<img src=\"{}\" alt=\"Company Logo\">\n",
                            escape_html(logo)
                        ));
                    }
                    html.push_str(&format!("<h1>{}</h1>\n", escape_html(company_name)));
                    if let Some(motto) = motto {
                        html.push_str(&format!(
                            "<p class=\"motto\">{}</p>\n",
                            escape_html(motto)
                        ));
                    }
                    html.push_str(&format!("<p>{}</p>\n", escape_html(address)));
                    html.push_str(&format!("<p>{}</p>\n", escape_html(contact_line)));
                    if let Some(website_line) = website_line {
                        html.push_str(&format!("<p>{}</p>\n", escape_html(website_line)));
                    }
                    html.push_str("</div>\n");
                }
                DocumentSection::Metadata {
                    letter_number,
                    date,
                    attachments_line,
                    subject,
                } => {
                    html.push_str("<div class=\"metadata\">\n");
                    html.push_str(&format!(
                        "<p><strong>Nomor:</strong> {}</p>\n",
                        escape_html(letter_number)
                    ));
                    html.push_str(&format!(
                        "<p><strong>Tanggal:</strong> {}</p>\n",
                        escape_html(date)
                    ));
                    if let Some(attachments_line) = attachments_line {
                        html.push_str(&format!(
                            "<p><strong>Lampiran:</strong> {}</p>\n",
                            escape_html(attachments_line)
                        ));
                    }
                    html.push_str(&format!(
                        "<p><strong>Perihal:</strong> <strong>{}</strong></p>\n",
                        escape_html(subject)
                    ));
                    html.push_str("</div>\n");
                }
                DocumentSection::Salutation {
                    greeting,
                    recipient_name,
                    recipient_position,
                    recipient_address,
                } => {
                    html.push_str("<div class=\"salutation\">\n");
                    html.push_str(&format!("<p>{}</p>\n", escape_html(greeting)));
                    html.push_str(&format!(
                        "<p><strong>{}</strong></p>\n",
                        escape_html(recipient_name)
                    ));
                    if let Some(recipient_position) = recipient_position {
                        html.push_str(&format!("<p>{}</p>\n", escape_html(recipient_position)));
                    }
                    if let Some(recipient_address) = recipient_address {
                        html.push_str(&format!(
                            "<p class=\"address\">{}</p>\n",
                            escape_html(recipient_address)
                        ));
                    }
                    html.push_str("</div>\n");
                }
                DocumentSection::Opening { text } => {
                    html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
                }
                DocumentSection::Body { paragraphs } => {
                    html.push_str("<div class=\"body\">\n");
                    for paragraph in paragraphs {
                        html.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
                    }
                    html.push_str("</div>\n");
                }
                DocumentSection::Closing { text } => {
                    html.push_str(&format!(
                        "<p class=\"closing\">{}</p>\n",
                        escape_html(text)
                    ));
                }
                DocumentSection::Signatures { columns } => {
                    html.push_str("<div class=\"signatures\">\n");
                    for column in columns {
                        html.push_str("<div class=\"signature-col\">\n");
                        html.push_str(&format!("<p>{}</p>\n", escape_html(&column.position)));
                        match &column.signature_image {
                            Some(reference) => html.push_str(&format!(
                                "<img class=\"signature-space\" src=\"{}\" alt=\"Signature\">\n",
                                escape_html(reference)
                            )),
                            None => html.push_str("<div class=\"signature-space\"></div>\n"),
                        }
                        html.push_str(&format!(
                            "<div class=\"signature-name\"><p><strong>{}</strong></p></div>\n",
                            escape_html(&column.name)
                        ));
                        html.push_str("</div>\n");
                    }
                    html.push_str("</div>\n");
                }
                DocumentSection::CarbonCopies { heading, entries } => {
                    html.push_str("<div class=\"cc\">\n");
                    html.push_str(&format!(
                        "<p><strong>{}</strong></p>\n",
                        escape_html(heading)
                    ));
                    for entry in entries {
                        html.push_str(&format!("<p>{}</p>\n", escape_html(entry)));
                    }
                    html.push_str("</div>\n");
                }
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}
