//! Constants used throughout the symptom checker core crate.
//!
//! Fixed strings shown to the user and file/format defaults live here so the CLI, the REST
//! API and the log file all agree on them.

/// Default number of a condition's symptoms that must be present for it to be reported.
pub const DEFAULT_MATCH_THRESHOLD: usize = 2;

/// Default location of the diagnosis log when no explicit path is configured.
pub const DEFAULT_LOG_PATH: &str = "diagnosis_log.csv";

/// Timestamp format used in the `datetime` column of the diagnosis log.
pub const LOG_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix for a result listing one or more candidate conditions.
pub const POSSIBLE_CONDITIONS_PREFIX: &str = "가능한 질환";

/// Separator used when joining symptom labels or condition names for display.
pub const LABEL_SEPARATOR: &str = ", ";

/// Advisory shown when no condition reaches the match threshold.
pub const NO_CLEAR_RESULT_MESSAGE: &str =
    "명확한 질환을 판단하기 어렵습니다. 증상이 지속되면 병원을 방문하세요.";

/// Banner shown when any urgent symptom is reported.
pub const SEVERITY_NOTICE: &str =
    "위급한 증상이 있습니다. 즉시 119에 연락하거나 가까운 응급실을 방문하세요.";

/// Shown alongside every result.
pub const DISCLAIMER: &str =
    "본 서비스는 의료 진단이 아닌 참고용 정보입니다. 증상이 심하면 반드시 병원을 방문하세요.";
