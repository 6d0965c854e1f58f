use crate::error::{ImportError, Result};
use crate::vcf::export_vcf;
use dialsheet_core::ContactsResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Vcf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Vcf => "vcf",
        }
    }

    pub fn render(self, response: &ContactsResponse) -> Result<String> {
        match self {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(response)?),
            ExportFormat::Csv => render_csv(response),
            ExportFormat::Vcf => Ok(export_vcf(&response.contacts)),
        }
    }
}

fn render_csv(response: &ContactsResponse) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["number", "name"])?;
    for contact in &response.contacts {
        writer.write_record([contact.number.as_str(), contact.name.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ImportError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialsheet_core::{CanonicalPhone, Contact};

    fn response() -> ContactsResponse {
        ContactsResponse::extracted(vec![
            Contact {
                number: CanonicalPhone::new("5551234567").unwrap(),
                name: "Alice".to_string(),
            },
            Contact {
                number: CanonicalPhone::new("+442079460958").unwrap(),
                name: "Smith, Bob".to_string(),
            },
        ])
    }

    #[test]
    fn csv_export_quotes_fields_that_need_it() {
        let output = ExportFormat::Csv.render(&response()).unwrap();
        assert_eq!(
            output,
            "number,name\n5551234567,Alice\n+442079460958,\"Smith, Bob\"\n"
        );
    }

    #[test]
    fn json_export_keeps_the_response_shape() {
        let output = ExportFormat::Json.render(&response()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["contacts"][1]["number"], "+442079460958");
        assert_eq!(value["message"], "Successfully extracted 2 contacts");
    }

    #[test]
    fn vcf_export_writes_one_card_per_contact() {
        let output = ExportFormat::Vcf.render(&response()).unwrap();
        assert_eq!(output.matches("BEGIN:VCARD").count(), 2);
        assert_eq!(ExportFormat::Vcf.extension(), "vcf");
    }
}
