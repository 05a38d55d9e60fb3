//! Call-log query parameters, enumerations and records

use crate::error::{Error, Result};
use crate::query::{DateRange, PageSize, QuerySpec};
use crate::types::{JsonObject, WireEnum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path of the account-wide call-log endpoint
pub const ACCOUNT_CALL_LOGS_PATH: &str = "phone/call_logs";

/// Envelope field holding call-log records
pub const CALL_LOGS_FIELD: &str = "call_logs";

/// Path of one user's call-log endpoint
pub fn user_call_logs_path(user_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(user_id.as_bytes()).collect();
    format!("phone/users/{}/call_logs", encoded.replace('+', "%20"))
}

// ============================================================================
// Enumerations
// ============================================================================

/// Generates `Display` and `FromStr` from a type's [`WireEnum`] table
macro_rules! wire_enum_conversions {
    ($ty:ty, $param:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.wire_name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.wire_name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let expected: Vec<&str> =
                            Self::ALL.iter().map(|v| v.wire_name()).collect();
                        Error::invalid_argument(
                            $param,
                            format!(
                                "unknown value '{s}', expected one of: {}",
                                expected.join(", ")
                            ),
                        )
                    })
            }
        }
    };
}

/// Which calls to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallType {
    /// Every call
    #[default]
    All,
    /// Missed calls only
    Missed,
}

impl CallType {
    /// Every variant
    pub const ALL: [CallType; 2] = [CallType::All, CallType::Missed];
}

impl WireEnum for CallType {
    fn wire_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Missed => "missed",
        }
    }
}

wire_enum_conversions!(CallType, "type");

/// Where a call ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
    VoiceMail,
    Message,
    Forward,
    Extension,
    CallQueue,
    IvrMenu,
    CompanyDirectory,
    AutoReceptionist,
    ContactCenter,
    Disconnected,
    CommonAreaPhone,
    Pstn,
    TransferPhoneNumber,
    SipGroup,
    SharedLineGroup,
    Monitor,
}

impl PathType {
    /// Every variant
    pub const ALL: [PathType; 16] = [
        PathType::VoiceMail,
        PathType::Message,
        PathType::Forward,
        PathType::Extension,
        PathType::CallQueue,
        PathType::IvrMenu,
        PathType::CompanyDirectory,
        PathType::AutoReceptionist,
        PathType::ContactCenter,
        PathType::Disconnected,
        PathType::CommonAreaPhone,
        PathType::Pstn,
        PathType::TransferPhoneNumber,
        PathType::SipGroup,
        PathType::SharedLineGroup,
        PathType::Monitor,
    ];
}

impl WireEnum for PathType {
    fn wire_name(&self) -> &'static str {
        match self {
            Self::VoiceMail => "voiceMail",
            Self::Message => "message",
            Self::Forward => "forward",
            Self::Extension => "extension",
            Self::CallQueue => "callQueue",
            Self::IvrMenu => "ivrMenu",
            Self::CompanyDirectory => "companyDirectory",
            Self::AutoReceptionist => "autoReceptionist",
            Self::ContactCenter => "contactCenter",
            Self::Disconnected => "disconnected",
            Self::CommonAreaPhone => "commonAreaPhone",
            Self::Pstn => "pstn",
            Self::TransferPhoneNumber => "transferPhoneNumber",
            Self::SipGroup => "sipGroup",
            Self::SharedLineGroup => "sharedLineGroup",
            Self::Monitor => "monitor",
        }
    }
}

wire_enum_conversions!(PathType, "path");

/// Which timestamp the date range filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeType {
    /// Call start time
    #[default]
    StartTime,
    /// Call end time
    EndTime,
}

impl TimeType {
    /// Every variant
    pub const ALL: [TimeType; 2] = [TimeType::StartTime, TimeType::EndTime];
}

impl WireEnum for TimeType {
    fn wire_name(&self) -> &'static str {
        match self {
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        }
    }
}

wire_enum_conversions!(TimeType, "time_type");

// ============================================================================
// Queries
// ============================================================================

/// Parameters for one page of a user's call logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCallLogQuery {
    user_id: String,
    dates: DateRange,
    call_type: Option<CallType>,
    phone_number: Option<String>,
    page_size: PageSize,
    page_token: Option<String>,
}

impl UserCallLogQuery {
    /// Query the call logs of `user_id` (an ID, email or `me`)
    pub fn new(user_id: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(Error::invalid_argument("user_id", "must not be empty"));
        }
        // Dot segments would be resolved away when joined onto the base URL
        if matches!(user_id.as_str(), "." | "..") {
            return Err(Error::invalid_argument(
                "user_id",
                format!("'{user_id}' is not a valid user ID"),
            ));
        }
        Ok(Self {
            user_id,
            dates: DateRange::new(),
            call_type: None,
            phone_number: None,
            page_size: PageSize::DEFAULT,
            page_token: None,
        })
    }

    /// Restrict to a date range
    #[must_use]
    pub fn dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    /// Filter by call type
    #[must_use]
    pub fn call_type(mut self, call_type: CallType) -> Self {
        self.call_type = Some(call_type);
        self
    }

    /// Filter by the phone number on the other end
    #[must_use]
    pub fn phone_number(mut self, number: impl Into<String>) -> Self {
        self.phone_number = Some(number.into());
        self
    }

    /// Set a validated page size
    #[must_use]
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Validate and set a raw page size
    pub fn try_page_size(self, size: u32) -> Result<Self> {
        Ok(self.page_size(PageSize::new(size)?))
    }

    /// Continue from a previous page's token
    #[must_use]
    pub fn page_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.page_token = token.map(Into::into);
        self
    }

    /// The queried user
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Render as a single-page query
    pub fn to_spec(&self) -> Result<QuerySpec> {
        QuerySpec::builder(user_call_logs_path(&self.user_id))
            .date_range(&self.dates)
            .param("type", self.call_type.map(WireEnum::to_query_value))
            .param("phone_number", self.phone_number.as_ref())
            .page_size(self.page_size)
            .page_token(self.page_token.as_ref())
            .build()
    }
}

/// Parameters for one page of account-wide call logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCallLogQuery {
    dates: DateRange,
    call_type: Option<CallType>,
    path: Option<PathType>,
    time_type: Option<TimeType>,
    site_id: Option<String>,
    charged_only: bool,
    page_size: PageSize,
    page_token: Option<String>,
}

impl Default for AccountCallLogQuery {
    fn default() -> Self {
        Self {
            dates: DateRange::new(),
            call_type: None,
            path: None,
            time_type: Some(TimeType::default()),
            site_id: None,
            charged_only: false,
            page_size: PageSize::DEFAULT,
            page_token: None,
        }
    }
}

impl AccountCallLogQuery {
    /// Query with default filters (`startTime`, not charged-only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a date range
    #[must_use]
    pub fn dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    /// Filter by call type
    #[must_use]
    pub fn call_type(mut self, call_type: CallType) -> Self {
        self.call_type = Some(call_type);
        self
    }

    /// Filter by call path
    #[must_use]
    pub fn path(mut self, path: PathType) -> Self {
        self.path = Some(path);
        self
    }

    /// Choose the timestamp the date range applies to
    #[must_use]
    pub fn time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = Some(time_type);
        self
    }

    /// Leave the time type to the server default
    #[must_use]
    pub fn without_time_type(mut self) -> Self {
        self.time_type = None;
        self
    }

    /// Filter by site
    #[must_use]
    pub fn site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Only list calls that incurred a charge
    #[must_use]
    pub fn charged_only(mut self, charged_only: bool) -> Self {
        self.charged_only = charged_only;
        self
    }

    /// Set a validated page size
    #[must_use]
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Validate and set a raw page size
    pub fn try_page_size(self, size: u32) -> Result<Self> {
        Ok(self.page_size(PageSize::new(size)?))
    }

    /// Continue from a previous page's token
    #[must_use]
    pub fn page_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.page_token = token.map(Into::into);
        self
    }

    /// Render as a single-page query
    pub fn to_spec(&self) -> Result<QuerySpec> {
        QuerySpec::builder(ACCOUNT_CALL_LOGS_PATH)
            .date_range(&self.dates)
            .param("type", self.call_type.map(WireEnum::to_query_value))
            .param("path", self.path.map(WireEnum::to_query_value))
            .param("time_type", self.time_type.map(WireEnum::to_query_value))
            .param("site_id", self.site_id.as_ref())
            .value("charged_call_logs", self.charged_only)
            .page_size(self.page_size)
            .page_token(self.page_token.as_ref())
            .build()
    }
}

// ============================================================================
// Records
// ============================================================================

/// One entry of a user's call log
///
/// Fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCallLog {
    pub id: String,
    #[serde(default)]
    pub call_type: Option<String>,
    #[serde(default)]
    pub caller_number: Option<String>,
    #[serde(default)]
    pub caller_name: Option<String>,
    #[serde(default)]
    pub callee_number: Option<String>,
    #[serde(default)]
    pub callee_name: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    /// Call length in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub recording_id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Site a call was placed through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Owner of the extension that handled a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogOwner {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub owner_type: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One entry of the account-wide call log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCallLog {
    pub id: String,
    #[serde(default)]
    pub call_type: Option<String>,
    #[serde(default)]
    pub caller_number: Option<String>,
    #[serde(default)]
    pub caller_name: Option<String>,
    #[serde(default)]
    pub callee_number: Option<String>,
    #[serde(default)]
    pub callee_name: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    /// Call length in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub charge: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub site: Option<Site>,
    #[serde(default)]
    pub owner: Option<CallLogOwner>,
    #[serde(flatten)]
    pub extra: JsonObject,
}
