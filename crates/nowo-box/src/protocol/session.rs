//! Session creation protocol types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::protocol::constants::{DeviceTypes, SessionDevice};
use crate::protocol::deserialize_id;

/// Body of `POST /api/v1/session`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest<'a> {
    #[serde(rename = "type")]
    pub session_type: &'static str,
    pub username: &'a str,
    pub password: &'a str,
    pub device: ClientDevice,
}

impl<'a> SessionRequest<'a> {
    /// Build an OTT session request for the given credentials.
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            session_type: SessionDevice::SESSION_TYPE,
            username,
            password,
            device: ClientDevice::default(),
        }
    }
}

/// The client device this session is opened for.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDevice {
    pub alias: &'static str,
    pub properties: ClientDeviceProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDeviceProperties {
    #[serde(rename = "deviceOS")]
    pub device_os: &'static str,
    #[serde(rename = "deviceOSVersion")]
    pub device_os_version: &'static str,
    #[serde(rename = "softwareVersion")]
    pub software_version: &'static str,
}

impl Default for ClientDevice {
    fn default() -> Self {
        Self {
            alias: SessionDevice::ALIAS,
            properties: ClientDeviceProperties {
                device_os: SessionDevice::DEVICE_OS,
                device_os_version: SessionDevice::DEVICE_OS_VERSION,
                software_version: SessionDevice::SOFTWARE_VERSION,
            },
        }
    }
}

/// Response of `POST /api/v1/session`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    /// Session id, used as the bearer token.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub properties: SessionProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionProperties {
    /// Devices registered to the account.
    #[serde(deserialize_with = "deserialize_devices")]
    pub stbs: Vec<StbInfo>,
}

/// Only set-top-box entries must be complete; other kinds are kept with
/// whatever `id` and `name` they carry.
fn deserialize_devices<'de, D>(deserializer: D) -> Result<Vec<StbInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|entry| StbInfo::from_entry(entry).map_err(D::Error::custom))
        .collect()
}

/// A device registered to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StbInfo {
    /// Device id, used in command endpoint paths.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// User-visible device name (e.g. "Sala").
    pub name: String,

    /// Device kind. Only [`DeviceType::Stb`] devices accept play commands.
    #[serde(rename = "type")]
    pub kind: DeviceType,
}

/// Kind of a registered device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    /// A set-top-box.
    Stb,

    /// Any other device kind, kept verbatim.
    Other(String),
}

impl DeviceType {
    #[must_use]
    pub fn is_stb(&self) -> bool {
        matches!(self, DeviceType::Stb)
    }
}

impl From<String> for DeviceType {
    fn from(value: String) -> Self {
        if value == DeviceTypes::STB {
            DeviceType::Stb
        } else {
            DeviceType::Other(value)
        }
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        match value {
            DeviceType::Stb => DeviceTypes::STB.to_string(),
            DeviceType::Other(kind) => kind,
        }
    }
}

impl StbInfo {
    fn from_entry(entry: Value) -> Result<Self, serde_json::Error> {
        let kind = entry
            .get("type")
            .and_then(Value::as_str)
            .map_or_else(|| DeviceType::Other(String::new()), |k| k.to_string().into());
        if kind.is_stb() {
            return serde_json::from_value(entry);
        }

        let id = match entry.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(Self { id, name, kind })
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Stb => write!(f, "{}", DeviceTypes::STB),
            DeviceType::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// An authenticated session: the bearer token plus the account's devices.
///
/// Created once per authentication and never refreshed.
#[derive(Clone)]
pub struct Session {
    token: String,
    devices: Vec<StbInfo>,
}

impl Session {
    pub fn new(token: impl Into<String>, devices: Vec<StbInfo>) -> Self {
        Self {
            token: token.into(),
            devices,
        }
    }

    /// Bearer token for subsequent requests.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// All devices of the account, in API order.
    pub fn devices(&self) -> &[StbInfo] {
        &self.devices
    }
}

impl From<SessionResponse> for Session {
    fn from(response: SessionResponse) -> Self {
        Self::new(response.id, response.properties.stbs)
    }
}

// The token is a credential; keep it out of debug output.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("devices", &self.devices)
            .finish()
    }
}
