use serde::{Deserialize, Serialize};

/// Media kind the addon can be asked to resolve a stream for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMediaType(pub String);

impl std::fmt::Display for UnknownMediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown media type: {}", self.0)
    }
}

impl std::error::Error for UnknownMediaType {}

/// Backend locations a user supplies at install time, decoded from the
/// base64 segment of the install link. Both fields are required for a
/// request to proceed; the shape of the URLs is not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
}

/// Where the backend listens and where the client should pull the playback
/// stream from, once the gate has let a request through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendLocation {
    pub backend_url: String,
    pub stream_url: String,
}

/// One candidate playback source, shaped the way the media-center client
/// expects it (`name` is the addon label shown next to the title).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub url: String,
    pub title: String,
    pub name: String,
}

/// Response body of the stream resource. Always well-formed; every failure
/// path collapses to an empty `streams` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamDescriptor>,
}

impl StreamsResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(stream: StreamDescriptor) -> Self {
        Self {
            streams: vec![stream],
        }
    }
}
