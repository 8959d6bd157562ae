use std::path::PathBuf;

use anyhow::{Result, bail};

pub const COMPANY_HEADERS: [&str; 21] = [
    "Company_Name_Location",
    "Company_Name",
    "Company_MAIN_Phone",
    "Company_Job_Type",
    "Company_Street",
    "Company_City",
    "Company_State",
    "Company_Zip/Postal",
    "Company_Country",
    "Company_URL",
    "Industry",
    "Buying_Teir",
    "Billing_HQ?",
    "Billing_Company_ID",
    "Billing_Main_Contact_ID (LU)",
    "Billing_Main_Contact_Name (LU)",
    "ALL_Company_Contact_Emails",
    "ALL_Contact_Names",
    "Date_Created",
    "Hist_Company_ID_1",
    "Hist_Company_ID_2",
];

pub const CONTACT_HEADERS: [&str; 16] = [
    "Contact_Email",
    "Contact_Name (First Last)",
    "Contact_Phone_Direct",
    "Company_Name_Location",
    "Company_ID (LU)",
    "Industry (from MASTER Company)",
    "Contact_Greeting_Gender",
    "Contact_Job_Type",
    "Contact_ALL_Phones_JSON",
    "Contact_Notes",
    "LinkedIn_URL",
    "Contact_ID",
    "Billing_Main_Contact",
    "Hist_Contact_ID_1",
    "Hist_Contact_ID_2",
    "Date_Created",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityStateZip {
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    pub addresses: Vec<String>,
    pub city_state_zip: Vec<CityStateZip>,
    pub company_mentions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRecord {
    pub company_name_location: String,
    pub company_name: String,
    pub company_main_phone: String,
    pub company_job_type: String,
    pub company_street: String,
    pub company_city: String,
    pub company_state: String,
    pub company_zip_postal: String,
    pub company_country: String,
    pub company_url: String,
    pub industry: String,
    pub buying_tier: String,
    pub billing_hq: String,
    pub billing_company_id: String,
    pub billing_main_contact_id: String,
    pub billing_main_contact_name: String,
    pub all_company_contact_emails: String,
    pub all_contact_names: String,
    pub date_created: String,
    pub hist_company_id_1: String,
    pub hist_company_id_2: String,
}

impl CompanyRecord {
    pub fn values(&self) -> [&str; 21] {
        [
            self.company_name_location.as_str(),
            self.company_name.as_str(),
            self.company_main_phone.as_str(),
            self.company_job_type.as_str(),
            self.company_street.as_str(),
            self.company_city.as_str(),
            self.company_state.as_str(),
            self.company_zip_postal.as_str(),
            self.company_country.as_str(),
            self.company_url.as_str(),
            self.industry.as_str(),
            self.buying_tier.as_str(),
            self.billing_hq.as_str(),
            self.billing_company_id.as_str(),
            self.billing_main_contact_id.as_str(),
            self.billing_main_contact_name.as_str(),
            self.all_company_contact_emails.as_str(),
            self.all_contact_names.as_str(),
            self.date_created.as_str(),
            self.hist_company_id_1.as_str(),
            self.hist_company_id_2.as_str(),
        ]
    }

    pub fn from_row(row: &[String]) -> Result<Self> {
        let [
            company_name_location,
            company_name,
            company_main_phone,
            company_job_type,
            company_street,
            company_city,
            company_state,
            company_zip_postal,
            company_country,
            company_url,
            industry,
            buying_tier,
            billing_hq,
            billing_company_id,
            billing_main_contact_id,
            billing_main_contact_name,
            all_company_contact_emails,
            all_contact_names,
            date_created,
            hist_company_id_1,
            hist_company_id_2,
        ] = row
        else {
            bail!(
                "company row has {} columns, expected {}",
                row.len(),
                COMPANY_HEADERS.len()
            );
        };

        Ok(Self {
            company_name_location: company_name_location.clone(),
            company_name: company_name.clone(),
            company_main_phone: company_main_phone.clone(),
            company_job_type: company_job_type.clone(),
            company_street: company_street.clone(),
            company_city: company_city.clone(),
            company_state: company_state.clone(),
            company_zip_postal: company_zip_postal.clone(),
            company_country: company_country.clone(),
            company_url: company_url.clone(),
            industry: industry.clone(),
            buying_tier: buying_tier.clone(),
            billing_hq: billing_hq.clone(),
            billing_company_id: billing_company_id.clone(),
            billing_main_contact_id: billing_main_contact_id.clone(),
            billing_main_contact_name: billing_main_contact_name.clone(),
            all_company_contact_emails: all_company_contact_emails.clone(),
            all_contact_names: all_contact_names.clone(),
            date_created: date_created.clone(),
            hist_company_id_1: hist_company_id_1.clone(),
            hist_company_id_2: hist_company_id_2.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub contact_email: String,
    pub contact_name: String,
    pub contact_phone_direct: String,
    pub company_name_location: String,
    pub company_id: String,
    pub industry: String,
    pub contact_greeting_gender: String,
    pub contact_job_type: String,
    pub contact_all_phones_json: String,
    pub contact_notes: String,
    pub linkedin_url: String,
    pub contact_id: String,
    pub billing_main_contact: String,
    pub hist_contact_id_1: String,
    pub hist_contact_id_2: String,
    pub date_created: String,
}

impl ContactRecord {
    pub fn values(&self) -> [&str; 16] {
        [
            self.contact_email.as_str(),
            self.contact_name.as_str(),
            self.contact_phone_direct.as_str(),
            self.company_name_location.as_str(),
            self.company_id.as_str(),
            self.industry.as_str(),
            self.contact_greeting_gender.as_str(),
            self.contact_job_type.as_str(),
            self.contact_all_phones_json.as_str(),
            self.contact_notes.as_str(),
            self.linkedin_url.as_str(),
            self.contact_id.as_str(),
            self.billing_main_contact.as_str(),
            self.hist_contact_id_1.as_str(),
            self.hist_contact_id_2.as_str(),
            self.date_created.as_str(),
        ]
    }

    pub fn from_row(row: &[String]) -> Result<Self> {
        let [
            contact_email,
            contact_name,
            contact_phone_direct,
            company_name_location,
            company_id,
            industry,
            contact_greeting_gender,
            contact_job_type,
            contact_all_phones_json,
            contact_notes,
            linkedin_url,
            contact_id,
            billing_main_contact,
            hist_contact_id_1,
            hist_contact_id_2,
            date_created,
        ] = row
        else {
            bail!(
                "contact row has {} columns, expected {}",
                row.len(),
                CONTACT_HEADERS.len()
            );
        };

        Ok(Self {
            contact_email: contact_email.clone(),
            contact_name: contact_name.clone(),
            contact_phone_direct: contact_phone_direct.clone(),
            company_name_location: company_name_location.clone(),
            company_id: company_id.clone(),
            industry: industry.clone(),
            contact_greeting_gender: contact_greeting_gender.clone(),
            contact_job_type: contact_job_type.clone(),
            contact_all_phones_json: contact_all_phones_json.clone(),
            contact_notes: contact_notes.clone(),
            linkedin_url: linkedin_url.clone(),
            contact_id: contact_id.clone(),
            billing_main_contact: billing_main_contact.clone(),
            hist_contact_id_1: hist_contact_id_1.clone(),
            hist_contact_id_2: hist_contact_id_2.clone(),
            date_created: date_created.clone(),
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DocumentStage {
    Pending,
    TocLocated,
    TextExtracted,
    FieldsExtracted,
    RecordsBuilt,
    Aggregated,
}

impl DocumentStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::TocLocated => "toc_located",
            Self::TextExtracted => "text_extracted",
            Self::FieldsExtracted => "fields_extracted",
            Self::RecordsBuilt => "records_built",
            Self::Aggregated => "aggregated",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub run_stamp: String,
    pub discovered_pdf_count: usize,
    pub selected_pdf_count: usize,
    pub processed_pdf_count: usize,
    pub failed_pdf_count: usize,
    pub text_layer_page_count: usize,
    pub ocr_page_count: usize,
    pub ocr_failed_page_count: usize,
    pub company_count: usize,
    pub contact_count: usize,
    pub company_csv_path: Option<PathBuf>,
    pub contact_csv_path: Option<PathBuf>,
    pub warnings: Vec<String>,
}
