//! Worker identity records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ResidentNumber, WorkerId};

/// Employment form of a worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerType {
    /// 일용근로자
    #[default]
    Daily,
    PartTime,
    Contract,
    Regular,
}

/// A registered worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub worker_id: WorkerId,
    pub name: String,
    pub resident_number: ResidentNumber,
    /// Precomputed age; zero or absent means derive it from the resident number
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub worker_type: WorkerType,
}

impl Worker {
    pub fn new(worker_id: WorkerId, name: impl Into<String>, resident_number: impl Into<ResidentNumber>) -> Self {
        Self {
            worker_id,
            name: name.into(),
            resident_number: resident_number.into(),
            age: None,
            worker_type: WorkerType::Daily,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_worker_type(mut self, worker_type: WorkerType) -> Self {
        self.worker_type = worker_type;
        self
    }

    /// Age used for eligibility, relative to `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        self.age
            .filter(|age| *age > 0)
            .unwrap_or_else(|| self.resident_number.age_on(today))
    }
}
