use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::Report;

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
    }
);

impl ReferenceDb {
    /// Clear all stored data, used by the test harness
    pub async fn drop_database(&self) {
        self.reports.lock().await.clear();
    }
}
