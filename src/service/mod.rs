//! Entity services: validation, defaulting, timestamping and guarded
//! lifecycle transitions.
//!
//! Services are the only mutation path the UI sees. Each one validates the
//! full input (collecting every violation before failing), normalizes
//! optional blanks to NULL, stamps timestamps, and delegates to its
//! repository. The two cross-entity guards live here: a client cannot be
//! deactivated while it has open cases, and a case cannot be closed while
//! it has open deadlines.

pub mod cases;
pub mod clients;
pub mod deadlines;

pub use cases::CasesService;
pub use clients::ClientsService;
pub use deadlines::DeadlinesService;

use crate::repo::{CasesRepo, ClientsRepo, DeadlinesRepo};
use crate::storage::Database;

/// The full service layer wired over one shared connection.
///
/// Repositories are cheap table bindings, so services that share a table
/// each get their own instance.
pub struct Services<'a> {
    pub clients: ClientsService<'a>,
    pub cases: CasesService<'a>,
    pub deadlines: DeadlinesService<'a>,
}

impl<'a> Services<'a> {
    /// Wire the three services over an explicitly passed database handle.
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            clients: ClientsService::new(ClientsRepo::new(db), CasesRepo::new(db)),
            cases: CasesService::new(CasesRepo::new(db), DeadlinesRepo::new(db)),
            deadlines: DeadlinesService::new(DeadlinesRepo::new(db)),
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for service tests.

    use super::Services;
    use crate::model::{CaseInput, ClientInput, DeadlineInput};
    use crate::storage::Database;

    pub fn services_db() -> Database {
        Database::open_memory().expect("in-memory database should open")
    }

    /// A minimal valid client form.
    pub fn client_input(name: &str) -> ClientInput {
        ClientInput {
            name: Some(name.to_string()),
            country: Some("DE".to_string()),
            ..ClientInput::default()
        }
    }

    /// A minimal valid case form for the given client.
    pub fn case_input(client_id: i64) -> CaseInput {
        CaseInput {
            client_id: Some(client_id),
            client_ref: Some("ACME-001".to_string()),
            ..CaseInput::default()
        }
    }

    /// A minimal valid deadline form for the given case.
    pub fn deadline_input(case_id: i64, due_date: &str) -> DeadlineInput {
        DeadlineInput {
            case_id: Some(case_id),
            description: Some("File response to office action".to_string()),
            due_date: Some(due_date.to_string()),
            deadline_type: Some("statutory".to_string()),
            status: Some("Pending".to_string()),
            ..DeadlineInput::default()
        }
    }

    /// Insert a valid case for the client and return its id.
    pub fn insert_case(services: &Services<'_>, client_id: i64) -> i64 {
        services
            .cases
            .insert_case(&case_input(client_id))
            .expect("case insert should succeed")
    }

    /// Insert a valid deadline on the case and return its id.
    pub fn insert_deadline(services: &Services<'_>, case_id: i64, due_date: &str) -> i64 {
        services
            .deadlines
            .insert_deadline(&deadline_input(case_id, due_date))
            .expect("deadline insert should succeed")
    }
}
