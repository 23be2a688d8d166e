//! Umbrella advisory derived from today's hourly descriptions.

use serde::{Deserialize, Serialize};

use crate::model::HourlyRow;

/// Language of upstream descriptions and of the fixed dashboard texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Korean,
    English,
}

impl Locale {
    /// Value sent as the upstream `lang` parameter.
    pub fn lang_code(&self) -> &'static str {
        match self {
            Locale::Korean => "kr",
            Locale::English => "en",
        }
    }

    pub fn rain_keywords(&self) -> RainKeywords {
        match self {
            Locale::Korean => RainKeywords::new(["비", "소나기"]),
            Locale::English => RainKeywords::new(["rain", "shower"]),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "korean" | "kr" | "ko" => Ok(Locale::Korean),
            "english" | "en" => Ok(Locale::English),
            _ => Err(anyhow::anyhow!(
                "Unknown locale '{value}'. Supported locales: korean, english."
            )),
        }
    }
}

/// Substrings that mark a description as rainy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RainKeywords {
    keywords: Vec<String>,
}

impl RainKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.keywords
            .iter()
            .any(|k| description.contains(&k.to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    Umbrella,
    NoUmbrella,
}

impl Advisory {
    pub fn for_rows(rows: &[HourlyRow], keywords: &RainKeywords) -> Self {
        if rows.iter().any(|r| keywords.matches(&r.description)) {
            Advisory::Umbrella
        } else {
            Advisory::NoUmbrella
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Advisory::Umbrella, Locale::Korean) => "☔ 우산을 들고 가는 것을 추천합니다!",
            (Advisory::NoUmbrella, Locale::Korean) => "☀ 오늘은 우산이 필요 없을 것 같아요.",
            (Advisory::Umbrella, Locale::English) => "☔ Take an umbrella today!",
            (Advisory::NoUmbrella, Locale::English) => "☀ No umbrella needed today.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(descriptions: &[&str]) -> Vec<HourlyRow> {
        descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| HourlyRow {
                time: format!("{:02}:00", i * 3),
                temperature_c: 15.0,
                description: d.to_string(),
            })
            .collect()
    }

    #[test]
    fn shower_or_rain_substring_recommends_umbrella() {
        let kw = Locale::Korean.rain_keywords();

        assert_eq!(Advisory::for_rows(&rows(&["맑음", "소나기"]), &kw), Advisory::Umbrella);
        assert_eq!(Advisory::for_rows(&rows(&["실 비", "맑음"]), &kw), Advisory::Umbrella);
    }

    #[test]
    fn clear_only_needs_no_umbrella() {
        let kw = Locale::Korean.rain_keywords();

        assert_eq!(Advisory::for_rows(&rows(&["맑음", "맑음"]), &kw), Advisory::NoUmbrella);
        assert_eq!(Advisory::for_rows(&[], &kw), Advisory::NoUmbrella);
    }

    #[test]
    fn korean_keyword_set_is_rain_and_shower() {
        assert_eq!(Locale::Korean.rain_keywords().keywords(), ["비", "소나기"]);
    }

    #[test]
    fn english_keywords_ignore_case() {
        let kw = Locale::English.rain_keywords();

        assert!(kw.matches("Light Rain"));
        assert!(kw.matches("shower rain"));
        assert!(!kw.matches("clear sky"));
    }

    #[test]
    fn korean_messages_are_fixed() {
        assert_eq!(
            Advisory::Umbrella.message(Locale::Korean),
            "☔ 우산을 들고 가는 것을 추천합니다!"
        );
        assert_eq!(
            Advisory::NoUmbrella.message(Locale::Korean),
            "☀ 오늘은 우산이 필요 없을 것 같아요."
        );
    }

    #[test]
    fn locale_parses_aliases() {
        assert_eq!("KR".parse::<Locale>().unwrap(), Locale::Korean);
        assert_eq!("english".parse::<Locale>().unwrap(), Locale::English);
        assert!("klingon".parse::<Locale>().is_err());
    }
}
