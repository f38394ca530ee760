//! Schedule page decoding from schema.org `Event` microdata
//!
//! Each event block must carry a name, a start date and a location with a
//! full postal address; anything else is optional. Properties are read from
//! the nearest enclosing item only, so the location's `name` never shadows
//! the event's.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use messesinfo_core::{MassParser, RawPayload};
use messesinfo_domain::constants::DEFAULT_MASS_DURATION_MINUTES;
use messesinfo_domain::{parse_microdata_start, Community, Mass, MessesError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const EVENT_SELECTOR: &str = r#"[itemscope][itemtype*="schema.org/Event"]"#;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| MessesError::Internal(format!("invalid selector '{css}': {err}")))
}

fn prop_selector(prop: &str) -> Result<Selector> {
    selector(&format!(r#"[itemprop~="{prop}"]"#))
}

/// Microdata value of a property element.
fn prop_value(element: ElementRef<'_>) -> Option<String> {
    let attr = |name: &str| element.value().attr(name).map(str::to_string);
    let value = match element.value().name() {
        _ if element.value().attr("content").is_some() => attr("content"),
        "img" | "audio" | "video" | "source" | "iframe" | "embed" => attr("src"),
        "a" | "area" | "link" => attr("href"),
        "time" => attr("datetime").or_else(|| Some(element.text().collect())),
        "data" | "meter" => attr("value"),
        _ => Some(element.text().collect::<Vec<_>>().join(" ")),
    }?;
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!normalized.is_empty()).then_some(normalized)
}

/// Property elements whose nearest enclosing item is `scope`.
fn own_prop<'a>(scope: ElementRef<'a>, prop: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = prop_selector(prop)?;
    let found = scope.select(&selector).find(|element| {
        element
            .ancestors()
            .find(|node| node.value().as_element().is_some_and(|e| e.attr("itemscope").is_some()))
            .is_some_and(|nearest| nearest.id() == scope.id())
    });
    Ok(found)
}

fn own_value(scope: ElementRef<'_>, prop: &str) -> Result<Option<String>> {
    Ok(own_prop(scope, prop)?.and_then(prop_value))
}

fn nested_value(scope: ElementRef<'_>, prop: &str) -> Result<Option<String>> {
    let selector = prop_selector(prop)?;
    let value = scope.select(&selector).find_map(prop_value);
    Ok(value)
}

fn required(value: Option<String>, index: usize, prop: &str) -> Result<String> {
    value.ok_or_else(|| MessesError::Parse(format!("event #{index}: missing itemprop '{prop}'")))
}

fn coordinate(raw: Option<String>, index: usize, prop: &str) -> Result<Option<f64>> {
    raw.map(|text| {
        text.replace(',', ".")
            .parse::<f64>()
            .map_err(|_| MessesError::Parse(format!("event #{index}: invalid {prop} '{text}'")))
    })
    .transpose()
}

/// Parser for the `/horaires/...` listing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMassParser;

impl HtmlMassParser {
    pub fn parse_document(&self, body: &str) -> Result<Vec<Mass>> {
        let document = Html::parse_document(body);
        let events = selector(EVENT_SELECTOR)?;

        let mut seen = HashSet::new();
        let mut masses = Vec::new();
        let mut duplicates = 0usize;
        for (index, event) in document.select(&events).enumerate() {
            let mass = self.parse_event(event, index)?;
            if seen.insert(mass.dedup_key()) {
                masses.push(mass);
            } else {
                duplicates += 1;
            }
        }

        debug!(masses = masses.len(), duplicates, "schedule page decoded");
        Ok(masses)
    }

    fn parse_event(&self, event: ElementRef<'_>, index: usize) -> Result<Mass> {
        let title = required(own_value(event, "name")?, index, "name")?;
        let start = parse_microdata_start(&required(own_value(event, "startDate")?, index, "startDate")?)?;
        let duration = match own_value(event, "endDate")? {
            Some(raw) => parse_microdata_start(&raw)? - start,
            None => Duration::minutes(DEFAULT_MASS_DURATION_MINUTES),
        };
        let duration =
            if duration > Duration::zero() { duration } else { Duration::minutes(DEFAULT_MASS_DURATION_MINUTES) };

        let location = own_prop(event, "location")?
            .ok_or_else(|| MessesError::Parse(format!("event #{index}: missing itemprop 'location'")))?;
        let community = Community {
            name: required(own_value(location, "name")?, index, "location name")?,
            street_address: required(nested_value(location, "streetAddress")?, index, "streetAddress")?,
            postal_code: required(nested_value(location, "postalCode")?, index, "postalCode")?,
            city: required(nested_value(location, "addressLocality")?, index, "addressLocality")?,
            latitude: coordinate(nested_value(location, "latitude")?, index, "latitude")?,
            longitude: coordinate(nested_value(location, "longitude")?, index, "longitude")?,
            diocese: nested_value(location, "diocese")?,
        };

        Ok(Mass::new(start, duration, title)?
            .with_subtitle(own_value(event, "alternateName")?)
            .with_picture(own_value(event, "image")?)
            .with_info(own_value(event, "description")?)
            .with_community(Some(Arc::new(community))))
    }
}

impl MassParser for HtmlMassParser {
    fn parse(&self, payload: RawPayload) -> Result<Vec<Mass>> {
        match payload {
            RawPayload::Html(body) => self.parse_document(&body),
            RawPayload::Json(_) => Err(MessesError::Parse("expected an HTML payload".into())),
        }
    }
}
