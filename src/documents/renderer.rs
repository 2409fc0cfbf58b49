//! Document rendering
//!
//! [`DocumentRenderer`] is the seam to whatever produces the actual file. The
//! generator only keeps the returned [`DocumentMetadata`]; the blob is written
//! out when documents are enabled.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::documents::plan::DocumentRequest;
use crate::facility::Home;
use crate::resident::Resident;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{DocumentId, DocumentType, ResidentId};

/// Descriptive record of a rendered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Unique identifier
    pub id: DocumentId,
    /// Resident the document belongs to
    pub resident_id: ResidentId,
    /// Stored file name
    pub file_name: String,
    /// File name shown to users
    pub original_file_name: String,
    /// MIME type
    pub content_type: String,
    /// Kind of document
    pub document_type: DocumentType,
    /// One-line description
    pub description: String,
    /// Size of the blob
    pub file_size_bytes: u64,
    /// Creation instant
    pub created_at: DateTime<Utc>,
}

/// Blob plus metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Metadata to keep in the dataset
    pub metadata: DocumentMetadata,
    /// File contents
    pub content: Vec<u8>,
}

/// Produces a document for a resident of a home
pub trait DocumentRenderer: std::fmt::Debug {
    /// Render `request` for `resident` living in `home`
    fn render(
        &self,
        resident: &Resident,
        home: &Home,
        request: &DocumentRequest,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<RenderedDocument>;
}

fn title(request: &DocumentRequest) -> String {
    match (request.document_type, request.subtype.as_deref()) {
        (DocumentType::CarePlan, _) => "INDIVIDUALIZED CARE PLAN".to_string(),
        (DocumentType::Insurance, _) => "INSURANCE INFORMATION SUMMARY".to_string(),
        (DocumentType::Identification, _) => "IDENTIFICATION VERIFICATION".to_string(),
        (_, Some(subtype)) => format!("{} {}", subtype.to_uppercase(), request.document_type.to_string().to_uppercase()),
        (kind, None) => kind.to_string().to_uppercase(),
    }
}

fn description(request: &DocumentRequest, name: &str) -> String {
    let subtype = request.subtype.as_deref().unwrap_or("General");
    match request.document_type {
        DocumentType::CarePlan => format!("Individualized care plan for {}", name),
        DocumentType::ConsentForm => format!("{} consent form for {}", subtype, name),
        DocumentType::Insurance => format!("Insurance information summary for {}", name),
        DocumentType::Identification => format!("Identification documents on file for {}", name),
        DocumentType::Legal => format!("{} document for {}", subtype, name),
        DocumentType::MedicalReport => format!("{} examination report for {}", subtype, name),
    }
}

fn display_stem(request: &DocumentRequest) -> String {
    match (request.document_type, request.subtype.as_deref()) {
        (DocumentType::Legal, Some(subtype)) => subtype.replace(' ', "_"),
        (DocumentType::CarePlan, _) => "Care_Plan".to_string(),
        (DocumentType::ConsentForm, _) => "Consent_Form".to_string(),
        (DocumentType::Insurance, _) => "Insurance_Info".to_string(),
        (DocumentType::Identification, _) => "ID_Verification".to_string(),
        (DocumentType::MedicalReport, _) => "Medical_Report".to_string(),
        (DocumentType::Legal, None) => "Legal".to_string(),
    }
}

/// Renders a plain-text summary of the resident's record
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    /// Create the renderer
    pub fn new() -> Self {
        Self
    }

    fn body(&self, resident: &Resident, home: &Home, request: &DocumentRequest) -> Result<String, std::fmt::Error> {
        let mut text = String::new();
        writeln!(text, "{}", title(request))?;
        writeln!(text, "{}", home.name)?;
        writeln!(text, "{}, {}, {} {}", home.address, home.city, home.state, home.zip_code)?;
        writeln!(text)?;
        writeln!(text, "Resident: {}", resident.full_name())?;
        writeln!(text, "Date of birth: {}", resident.date_of_birth.format("%B %d, %Y"))?;
        writeln!(text, "Admission date: {}", resident.admission_date.format("%B %d, %Y"))?;
        writeln!(text, "Primary physician: {} {}", resident.primary_physician, resident.primary_physician_phone)?;
        writeln!(
            text,
            "Emergency contact: {} ({}) {}",
            resident.emergency_contact_name,
            resident.emergency_contact_relationship,
            resident.emergency_contact_phone
        )?;

        match request.document_type {
            DocumentType::CarePlan | DocumentType::MedicalReport => {
                writeln!(text)?;
                writeln!(text, "Diagnoses:")?;
                for diagnosis in &resident.diagnoses {
                    writeln!(text, "  - {}", diagnosis)?;
                }
                let allergies =
                    if resident.allergies.is_empty() { "NKDA".to_string() } else { resident.allergies.join(", ") };
                writeln!(text, "Allergies: {}", allergies)?;
                writeln!(text, "Medications:")?;
                for medication in &resident.medications {
                    writeln!(text, "  - {} {} {}", medication.name, medication.dosage, medication.route)?;
                }
            }
            DocumentType::ConsentForm | DocumentType::Legal => {
                writeln!(text)?;
                writeln!(
                    text,
                    "I, {}, acknowledge the {} described above.",
                    resident.full_name(),
                    request.subtype.as_deref().unwrap_or("document")
                )?;
                writeln!(text, "Signature: ______________________")?;
            }
            DocumentType::Insurance | DocumentType::Identification => {}
        }

        writeln!(text)?;
        writeln!(text, "Date: {}", request.created_at.format("%B %d, %Y"))?;
        Ok(text)
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn render(
        &self,
        resident: &Resident,
        home: &Home,
        request: &DocumentRequest,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<RenderedDocument> {
        let content = self
            .body(resident, home, request)
            .map_err(|e| SimulationError::rendering_error(e.to_string()))?
            .into_bytes();

        let id = DocumentId::generate(rng);
        let short_id: String = id.as_uuid().simple().to_string().chars().take(8).collect();
        let metadata = DocumentMetadata {
            id,
            resident_id: resident.id,
            file_name: format!(
                "{}_{}_{}_{}.txt",
                request.document_type.file_stem(),
                resident.first_name.to_lowercase(),
                resident.last_name.to_lowercase(),
                short_id
            ),
            original_file_name: format!(
                "{}_{}_{}.txt",
                display_stem(request),
                resident.first_name,
                resident.last_name
            ),
            content_type: "text/plain".to_string(),
            document_type: request.document_type,
            description: description(request, &resident.full_name()),
            file_size_bytes: content.len() as u64,
            created_at: request.created_at,
        };

        Ok(RenderedDocument { metadata, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resident::resident::fixtures::resident;
    use crate::simulation::horizon::start_of_day;
    use crate::types::{HomeId, UserId};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn home(rng: &mut StdRng) -> Home {
        Home {
            id: HomeId::generate(rng),
            sequence: 2,
            name: "Maple Grove AFH".to_string(),
            address: "88 Maple Ave".to_string(),
            city: "Tacoma".to_string(),
            state: "WA".to_string(),
            zip_code: "98402".to_string(),
            phone_number: "(253) 555-0199".to_string(),
            capacity: 6,
            is_active: true,
            created_at: start_of_day(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()),
            created_by_id: UserId::generate(rng),
        }
    }

    #[test]
    fn test_metadata_describes_blob() {
        let mut rng = StdRng::seed_from_u64(11);
        let home = home(&mut rng);
        let stay = resident(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), &["Hypertension"]);
        let request = DocumentRequest {
            document_type: DocumentType::Legal,
            subtype: Some("Power of Attorney".to_string()),
            created_at: stay.admitted_at,
        };

        let rendered = PlainTextRenderer::new().render(&stay, &home, &request, &mut rng).unwrap();
        let metadata = &rendered.metadata;
        assert_eq!(metadata.file_size_bytes, rendered.content.len() as u64);
        assert_eq!(metadata.content_type, "text/plain");
        assert_eq!(metadata.resident_id, stay.id);
        assert!(metadata.file_name.starts_with("legal_"));
        assert!(metadata.file_name.ends_with(".txt"));
        assert!(metadata.original_file_name.starts_with("Power_of_Attorney_"));
        assert!(metadata.description.starts_with("Power of Attorney document for"));

        let text = String::from_utf8(rendered.content).unwrap();
        assert!(text.contains("Maple Grove AFH"));
        assert!(text.contains(&stay.full_name()));
    }

    #[test]
    fn test_care_plan_lists_medications() {
        let mut rng = StdRng::seed_from_u64(12);
        let home = home(&mut rng);
        let stay = resident(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), &["Hypertension"]);
        let request =
            DocumentRequest { document_type: DocumentType::CarePlan, subtype: None, created_at: stay.admitted_at };

        let rendered = PlainTextRenderer::new().render(&stay, &home, &request, &mut rng).unwrap();
        let text = String::from_utf8(rendered.content).unwrap();
        assert!(text.starts_with("INDIVIDUALIZED CARE PLAN"));
        assert!(text.contains("Hypertension"));
        assert!(text.contains("Lisinopril"));
    }
}
