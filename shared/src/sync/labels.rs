//! Label tuples parameterizing one published series per check.

use crate::models::{Check, Probe};

/// Label names of the per-check gauge families, in publication order.
pub const LABEL_NAMES: [&str; 9] = [
    "id",
    "name",
    "hostname",
    "resolution",
    "paused",
    "tags",
    "region",
    "country",
    "city",
];

/// Geographic labels resolved from a probe. Empty when the check was not enriched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GeoLabels {
    /// Probe region.
    pub region: String,
    /// Probe ISO country code.
    pub country: String,
    /// Probe city.
    pub city: String,
}

impl From<&Probe> for GeoLabels {
    fn from(probe: &Probe) -> Self {
        Self {
            region: probe.region.clone(),
            country: probe.country_iso.clone(),
            city: probe.city.clone(),
        }
    }
}

/// The fixed-shape label values of one series.
///
/// Equality is structural over every field; the values published alongside
/// the tuple are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelTuple {
    /// Check identity.
    pub id: String,
    /// Check name.
    pub name: String,
    /// Check host.
    pub hostname: String,
    /// Polling resolution.
    pub resolution: String,
    /// `"true"` or `"false"`.
    pub paused: String,
    /// Comma joined tag names.
    pub tags: String,
    /// Probe region.
    pub region: String,
    /// Probe country.
    pub country: String,
    /// Probe city.
    pub city: String,
}

impl LabelTuple {
    /// Builds the tuple for a check.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::models::{Check, CheckId};
    /// use shared::sync::{GeoLabels, LabelTuple};
    ///
    /// let check = Check::new(CheckId(3), "web", "example.com").with_status("paused");
    /// let labels = LabelTuple::for_check(&check, &GeoLabels::default());
    ///
    /// assert_eq!(labels.values()[0], "3");
    /// assert_eq!(labels.paused, "true");
    /// ```
    #[must_use]
    pub fn for_check(check: &Check, geo: &GeoLabels) -> Self {
        Self {
            id: check.id.to_string(),
            name: check.name.clone(),
            hostname: check.hostname.clone(),
            resolution: check.resolution.to_string(),
            paused: check.is_paused().to_string(),
            tags: check.tags_joined(),
            region: geo.region.clone(),
            country: geo.country.clone(),
            city: geo.city.clone(),
        }
    }

    /// Returns the values in [`LABEL_NAMES`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 9] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.hostname.as_str(),
            self.resolution.as_str(),
            self.paused.as_str(),
            self.tags.as_str(),
            self.region.as_str(),
            self.country.as_str(),
            self.city.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckId;

    fn check() -> Check {
        Check::new(CheckId(85975), "My check 1", "example.com")
            .with_status("up")
            .with_resolution(5)
            .with_tag("web")
            .with_tag("eu")
    }

    #[test]
    fn test_values_follow_label_names() {
        let geo = GeoLabels {
            region: "EU".to_string(),
            country: "DE".to_string(),
            city: "Frankfurt".to_string(),
        };
        let labels = LabelTuple::for_check(&check(), &geo);

        assert_eq!(
            labels.values(),
            [
                "85975",
                "My check 1",
                "example.com",
                "5",
                "false",
                "web,eu",
                "EU",
                "DE",
                "Frankfurt"
            ]
        );
        assert_eq!(LABEL_NAMES.len(), labels.values().len());
    }

    #[test]
    fn test_paused_override() {
        let check = check().with_status("paused").with_paused(false);
        let labels = LabelTuple::for_check(&check, &GeoLabels::default());
        assert_eq!(labels.paused, "true");
    }

    #[test]
    fn test_equality_covers_every_field() {
        let base = LabelTuple::for_check(&check(), &GeoLabels::default());
        assert_eq!(base, LabelTuple::for_check(&check(), &GeoLabels::default()));

        let renamed = LabelTuple::for_check(
            &Check {
                name: "renamed".to_string(),
                ..check()
            },
            &GeoLabels::default(),
        );
        assert_ne!(base, renamed);

        let moved = LabelTuple::for_check(
            &check(),
            &GeoLabels {
                city: "Paris".to_string(),
                ..GeoLabels::default()
            },
        );
        assert_ne!(base, moved);
    }

    #[test]
    fn test_status_and_latency_do_not_change_labels() {
        let a = LabelTuple::for_check(&check().with_response_time(10), &GeoLabels::default());
        let b = LabelTuple::for_check(
            &check().with_response_time(900).with_status("down"),
            &GeoLabels::default(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_geo_from_probe() {
        let probe = Probe::new(4, "NA", "US", "Denver");
        let geo = GeoLabels::from(&probe);
        assert_eq!(geo.region, "NA");
        assert_eq!(geo.country, "US");
        assert_eq!(geo.city, "Denver");
    }
}
