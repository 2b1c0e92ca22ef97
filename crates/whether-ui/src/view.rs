//! Forecast strip view.
//!
//! The view holds the currently rendered nodes: either one card per day or a
//! single error element. Every render replaces the whole content.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use whether_forecast::{ConditionDisplay, DailySummary};

/// View handle shared between a controller and whoever displays it
pub type SharedView = Arc<Mutex<ForecastView>>;

/// One day of the forecast strip
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: NaiveDate,
    /// Path of the condition icon, e.g. `images/rain.png`
    pub icon: String,
    pub label: String,
    pub min_temp: f64,
    pub max_temp: f64,
}

impl ForecastCard {
    pub fn from_summary(summary: &DailySummary, image_dir: &str) -> Self {
        let display = ConditionDisplay::for_token(&summary.condition);
        Self {
            date: summary.date,
            icon: format!("{}/{}", image_dir.trim_end_matches('/'), display.icon),
            label: display.label.into_owned(),
            min_temp: summary.min_temp,
            max_temp: summary.max_temp,
        }
    }

    /// Short date heading, e.g. "Sat 1 Jun"
    pub fn date_label(&self) -> String {
        self.date.format("%a %-d %b").to_string()
    }

    /// Closed temperature interval, e.g. "14°C - 22°C"
    pub fn temperature_range(&self) -> String {
        format!("{}°C - {}°C", self.min_temp, self.max_temp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Card(ForecastCard),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ForecastView {
    image_dir: String,
    nodes: Vec<ViewNode>,
}

impl ForecastView {
    pub fn new(image_dir: impl Into<String>) -> Self {
        Self {
            image_dir: image_dir.into(),
            nodes: Vec::new(),
        }
    }

    /// Create a view wrapped for sharing with a controller
    pub fn shared(image_dir: impl Into<String>) -> SharedView {
        Arc::new(Mutex::new(Self::new(image_dir)))
    }

    /// Replace the content with one card per summary
    pub fn render_forecast(&mut self, summaries: &[DailySummary]) {
        self.nodes = summaries
            .iter()
            .map(|summary| ViewNode::Card(ForecastCard::from_summary(summary, &self.image_dir)))
            .collect();
    }

    /// Replace the content with a single error element
    pub fn render_error(&mut self, message: impl Into<String>) {
        self.nodes = vec![ViewNode::Error(message.into())];
    }

    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    pub fn cards(&self) -> impl Iterator<Item = &ForecastCard> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Card(card) => Some(card),
            ViewNode::Error(_) => None,
        })
    }

    pub fn error_message(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            ViewNode::Error(message) => Some(message.as_str()),
            ViewNode::Card(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the container as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div id=\"forecastContainer\">\n");
        for node in &self.nodes {
            match node {
                ViewNode::Card(card) => {
                    html.push_str("  <div class=\"forecast-card\">\n");
                    html.push_str(&format!("    <h3>{}</h3>\n", card.date_label()));
                    html.push_str(&format!(
                        "    <img src=\"{}\" alt=\"{}\">\n",
                        escape_html(&card.icon),
                        escape_html(&card.label)
                    ));
                    html.push_str(&format!("    <p>{}</p>\n", escape_html(&card.label)));
                    html.push_str(&format!("    <p>🌡️ {}</p>\n", card.temperature_range()));
                    html.push_str("  </div>\n");
                }
                ViewNode::Error(message) => {
                    html.push_str(&format!("  <p class=\"error\">{}</p>\n", escape_html(message)));
                }
            }
        }
        html.push_str("</div>\n");
        html
    }
}

/// Plain-text rendering, one line per node
impl fmt::Display for ForecastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            match node {
                ViewNode::Card(card) => writeln!(
                    f,
                    "{:<10}  {:<24}  🌡️ {}  [{}]",
                    card.date_label(),
                    card.label,
                    card.temperature_range(),
                    card.icon
                )?,
                ViewNode::Error(message) => writeln!(f, "{}", message)?,
            }
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
