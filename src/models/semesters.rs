//! 学期标识
//!
//! 学期以 "Spring 2025" / "Fall 2024" 的形式存储。只有春、秋两季可以推算上一学期，
//! 其他季节（如 "Summer 2025"）仍可作为学期名使用，但没有上一学期。

use serde::Serialize;
use std::cmp::Ordering;

// 学期季节，声明顺序即同一年内的先后顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring, // 春季
    Fall,   // 秋季
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Fall => write!(f, "Fall"),
        }
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "fall" => Ok(Season::Fall),
            _ => Err(format!("Unrecognized season: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Semester {
    pub season: Season,
    pub year: i32,
}

impl Semester {
    pub fn new(season: Season, year: i32) -> Self {
        Self { season, year }
    }

    /// 上一学期：Spring Y 的上一学期是 Fall Y-1，Fall Y 的上一学期是 Spring Y
    ///
    /// 年份无法表示时返回 `None`。
    pub fn previous(&self) -> Option<Semester> {
        match self.season {
            Season::Spring => self
                .year
                .checked_sub(1)
                .map(|year| Semester::new(Season::Fall, year)),
            Season::Fall => Some(Semester::new(Season::Spring, self.year)),
        }
    }
}

impl Ord for Semester {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.season.cmp(&other.season))
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(season), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("Invalid semester: '{s}', expected e.g. 'Spring 2025'"));
        };
        let season = season.parse::<Season>()?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("Invalid semester year: '{year}'"))?;
        Ok(Semester::new(season, year))
    }
}

/// 根据学期名推算上一学期名，无法识别时返回 None
pub fn previous_semester(name: &str) -> Option<String> {
    name.parse::<Semester>()
        .ok()
        .and_then(|semester| semester.previous())
        .map(|previous| previous.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_of_spring_is_last_fall() {
        assert_eq!(previous_semester("Spring 2025").as_deref(), Some("Fall 2024"));
    }

    #[test]
    fn test_previous_of_fall_is_same_year_spring() {
        assert_eq!(previous_semester("Fall 2024").as_deref(), Some("Spring 2024"));
    }

    #[test]
    fn test_season_is_case_insensitive() {
        assert_eq!(previous_semester("spring 2025").as_deref(), Some("Fall 2024"));
        assert_eq!(previous_semester("  FALL   2023 ").as_deref(), Some("Spring 2023"));
    }

    #[test]
    fn test_unrecognized_semester_has_no_previous() {
        assert_eq!(previous_semester("Summer 2025"), None);
        assert_eq!(previous_semester("2025"), None);
        assert_eq!(previous_semester("Spring twenty"), None);
        assert_eq!(previous_semester("Spring 2025 extra"), None);
        assert_eq!(previous_semester(""), None);
    }

    #[test]
    fn test_earliest_year_has_no_previous() {
        assert_eq!(previous_semester(&format!("Spring {}", i32::MIN)), None);
        assert_eq!(
            previous_semester(&format!("Fall {}", i32::MIN)),
            Some(format!("Spring {}", i32::MIN))
        );
        let earliest = Semester::new(Season::Spring, i32::MIN);
        assert_eq!(earliest.previous(), None);
    }

    #[test]
    fn test_semester_ordering() {
        let fall_2024: Semester = "Fall 2024".parse().unwrap();
        let spring_2025: Semester = "Spring 2025".parse().unwrap();
        let spring_2024: Semester = "Spring 2024".parse().unwrap();
        assert!(spring_2024 < fall_2024);
        assert!(fall_2024 < spring_2025);
    }
}
