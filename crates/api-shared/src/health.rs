use crate::types::HealthRes;

/// Health check shared by the REST API and any future surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive. The checker holds no connections, so there is nothing
    /// else to check.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Symptom checker is alive".into(),
        }
    }
}
