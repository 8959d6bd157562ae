use anyhow::{Context, Result};

use crate::model::{CompanyRecord, ContactRecord, ExtractedFields};

pub fn build_company_record(stem: &str, fields: &ExtractedFields, created_at: &str) -> CompanyRecord {
    let mut record = CompanyRecord {
        company_name: stem.to_string(),
        company_main_phone: fields.phones.first().cloned().unwrap_or_default(),
        company_url: fields.urls.first().cloned().unwrap_or_default(),
        all_company_contact_emails: fields.emails.join("; "),
        date_created: created_at.to_string(),
        ..CompanyRecord::default()
    };

    if let Some(street) = fields.addresses.first() {
        record.company_street = street.clone();
    }

    if let Some(location) = fields.city_state_zip.first() {
        record.company_city = location.city.trim().to_string();
        record.company_state = location.state.trim().to_string();
        record.company_zip_postal = location.zip.trim().to_string();
    }

    record.company_name_location = company_name_location(
        &record.company_name,
        &record.company_city,
        &record.company_state,
    );

    record
}

pub fn build_contact_records(
    stem: &str,
    fields: &ExtractedFields,
    company: &CompanyRecord,
    created_at: &str,
) -> Result<Vec<ContactRecord>> {
    let all_phones_json =
        serde_json::to_string(&fields.phones).context("failed to serialize phone list")?;

    let contacts = fields
        .emails
        .iter()
        .enumerate()
        .map(|(index, email)| ContactRecord {
            contact_email: email.clone(),
            contact_id: format!("{}_contact_{}", stem, index + 1),
            company_name_location: company.company_name_location.clone(),
            contact_phone_direct: fields.phones.get(index).cloned().unwrap_or_default(),
            contact_all_phones_json: all_phones_json.clone(),
            date_created: created_at.to_string(),
            ..ContactRecord::default()
        })
        .collect();

    Ok(contacts)
}

fn company_name_location(name: &str, city: &str, state: &str) -> String {
    if city.is_empty() || state.is_empty() {
        name.to_string()
    } else {
        format!("{name} - {city}, {state}")
    }
}
