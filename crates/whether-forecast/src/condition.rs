//! Maps 7Timer! condition tokens to display icons and labels.

use std::borrow::Cow;

/// Icon used when a token is not recognized
pub const FALLBACK_ICON: &str = "clear.png";

/// Known weather conditions of the `civil` product, day/night agnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Humid,
    IsolatedShowers,
    OccasionalShowers,
    LightRain,
    Rain,
    RainSnow,
    Snow,
    LightSnow,
    ThunderstormRain,
    Thunderstorm,
    Fog,
    Windy,
}

impl Condition {
    pub const ALL: [Condition; 16] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::MostlyCloudy,
        Self::Cloudy,
        Self::Humid,
        Self::IsolatedShowers,
        Self::OccasionalShowers,
        Self::LightRain,
        Self::Rain,
        Self::RainSnow,
        Self::Snow,
        Self::LightSnow,
        Self::ThunderstormRain,
        Self::Thunderstorm,
        Self::Fog,
        Self::Windy,
    ];

    /// Look up an already normalized token
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "clear" => Self::Clear,
            "pcloudy" => Self::PartlyCloudy,
            "mcloudy" => Self::MostlyCloudy,
            "cloudy" => Self::Cloudy,
            "humid" => Self::Humid,
            "ishower" => Self::IsolatedShowers,
            "oshower" => Self::OccasionalShowers,
            "lightrain" => Self::LightRain,
            "rain" => Self::Rain,
            "rainsnow" => Self::RainSnow,
            "snow" => Self::Snow,
            "lightsnow" => Self::LightSnow,
            "tsrain" => Self::ThunderstormRain,
            "tstorm" => Self::Thunderstorm,
            "fog" => Self::Fog,
            "windy" => Self::Windy,
            _ => return None,
        })
    }

    /// The canonical token for this condition
    pub fn token(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "pcloudy",
            Self::MostlyCloudy => "mcloudy",
            Self::Cloudy => "cloudy",
            Self::Humid => "humid",
            Self::IsolatedShowers => "ishower",
            Self::OccasionalShowers => "oshower",
            Self::LightRain => "lightrain",
            Self::Rain => "rain",
            Self::RainSnow => "rainsnow",
            Self::Snow => "snow",
            Self::LightSnow => "lightsnow",
            Self::ThunderstormRain => "tsrain",
            Self::Thunderstorm => "tstorm",
            Self::Fog => "fog",
            Self::Windy => "windy",
        }
    }

    /// Get a human-readable description
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear Sky",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::MostlyCloudy => "Mostly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Humid => "Humid",
            Self::IsolatedShowers => "Isolated Showers",
            Self::OccasionalShowers => "Occasional Showers",
            Self::LightRain => "Light Rain",
            Self::Rain => "Rain",
            Self::RainSnow => "Rain & Snow",
            Self::Snow => "Snow",
            Self::LightSnow => "Light Snow",
            Self::ThunderstormRain => "Thunderstorm with Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Fog => "Fog",
            Self::Windy => "Windy",
        }
    }

    /// Icon file name, relative to the image directory
    pub fn icon_file(&self) -> &'static str {
        match self {
            Self::Clear => "clear.png",
            Self::PartlyCloudy => "pcloudy.png",
            Self::MostlyCloudy => "mcloudy.png",
            Self::Cloudy => "cloudy.png",
            Self::Humid => "humid.png",
            Self::IsolatedShowers => "ishower.png",
            Self::OccasionalShowers => "oshower.png",
            Self::LightRain => "lightrain.png",
            Self::Rain => "rain.png",
            Self::RainSnow => "rainsnow.png",
            Self::Snow => "snow.png",
            Self::LightSnow => "lightsnow.png",
            Self::ThunderstormRain => "tsrain.png",
            Self::Thunderstorm => "tstorm.png",
            Self::Fog => "fog.png",
            Self::Windy => "windy.png",
        }
    }
}

/// Lowercase a raw token and strip one trailing "day" or "night"
pub fn normalize_token(raw: &str) -> String {
    let mut token = raw.trim().to_lowercase();
    let stem_len = token
        .strip_suffix("day")
        .or_else(|| token.strip_suffix("night"))
        .map(str::len);
    if let Some(len) = stem_len {
        token.truncate(len);
    }
    token
}

/// Raised (and only logged) when a token is not in the condition table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weather code: {token:?}")]
pub struct NormalizationWarning {
    pub token: String,
}

/// Icon and label shown for a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionDisplay {
    pub icon: Cow<'static, str>,
    pub label: Cow<'static, str>,
}

impl From<Condition> for ConditionDisplay {
    fn from(condition: Condition) -> Self {
        Self {
            icon: Cow::Borrowed(condition.icon_file()),
            label: Cow::Borrowed(condition.label()),
        }
    }
}

impl ConditionDisplay {
    /// Resolve a raw token, returning the warning instead of logging it.
    ///
    /// Unknown tokens get the fallback icon and the token itself as label,
    /// with underscores turned into spaces.
    pub fn resolve(raw: &str) -> (Self, Option<NormalizationWarning>) {
        let token = normalize_token(raw);
        if let Some(condition) = Condition::from_token(&token) {
            return (condition.into(), None);
        }

        let label = if token.is_empty() {
            Cow::Borrowed(Condition::Clear.label())
        } else {
            Cow::Owned(token.replace('_', " "))
        };
        let display = Self {
            icon: Cow::Borrowed(FALLBACK_ICON),
            label,
        };
        (display, Some(NormalizationWarning { token }))
    }

    /// Resolve a raw token; unknown tokens are logged and fall back
    pub fn for_token(raw: &str) -> Self {
        let (display, warning) = Self::resolve(raw);
        if let Some(warning) = warning {
            tracing::warn!("{}", warning);
        }
        display
    }
}
