mod backend;
mod boundary;
mod csv_output;
mod fields;
mod page_text;
mod records;
mod run;

pub use backend::PopplerBackend;
pub use csv_output::{CsvTable, read_company_csv, read_contact_csv};
pub use run::run;
