//! Grouping of descriptors into the form's display sections.

use serde::Serialize;

use crate::config::FieldDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Main,
    Route,
    Team,
    Environmental,
    Maintenance,
    Leadership,
}

impl SectionKind {
    /// Display order of the rendered form.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Main,
        SectionKind::Route,
        SectionKind::Team,
        SectionKind::Environmental,
        SectionKind::Maintenance,
        SectionKind::Leadership,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Main => "Main Log",
            SectionKind::Route => "Route & Fuel",
            SectionKind::Team => "Team & Objectives",
            SectionKind::Environmental => "Environmental",
            SectionKind::Maintenance => "Maintenance",
            SectionKind::Leadership => "Leadership & Reflection",
        }
    }
}

const ROUTE_KEYWORDS: &[&str] = &["odo", "fuel", "mpg", "dist", "tire", "psi"];
const TEAM_KEYWORDS: &[&str] = &["team", "role", "name", "objectives"];
const ENVIRONMENTAL_KEYWORDS: &[&str] = &[
    "weather",
    "temp",
    "wind",
    "sky",
    "precip",
    "terrain",
    "sunrise",
    "sunset",
    "environmental",
];
const MAINTENANCE_KEYWORDS: &[&str] = &[
    "maintenance",
    "oil",
    "coolant",
    "brakes",
    "tires",
    "suspension",
    "lights",
    "winch",
    "recovery",
    "electrics",
];
const LEADERSHIP_KEYWORDS: &[&str] = &["leadership", "cohesion", "awareness", "journal"];

/// Pick the section for a field by keywords in its generated name.
///
/// Rules are checked in order, so `tires` lands in Route through its `tire`
/// prefix before the Maintenance rule sees it.
pub fn section_for(name: &str) -> SectionKind {
    let name = name.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|kw| name.contains(kw));

    if has_any(ROUTE_KEYWORDS) {
        SectionKind::Route
    } else if has_any(TEAM_KEYWORDS) {
        SectionKind::Team
    } else if has_any(ENVIRONMENTAL_KEYWORDS) {
        SectionKind::Environmental
    } else if has_any(MAINTENANCE_KEYWORDS) {
        SectionKind::Maintenance
    } else if has_any(LEADERSHIP_KEYWORDS) || (name.contains("lessons") && name.contains("carry")) {
        SectionKind::Leadership
    } else {
        SectionKind::Main
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub title: &'static str,
    pub fields: Vec<&'a FieldDescriptor>,
}

/// Group fields into all six sections, in display order. Sections may be
/// empty; field order inside a section follows the input.
pub fn organize(fields: &[FieldDescriptor]) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = SectionKind::ALL
        .iter()
        .map(|&kind| Section {
            kind,
            title: kind.title(),
            fields: Vec::new(),
        })
        .collect();

    for field in fields {
        let kind = section_for(&field.name);
        if let Some(section) = sections.iter_mut().find(|s| s.kind == kind) {
            section.fields.push(field);
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FieldType;

    #[test]
    fn test_section_rules() {
        assert_eq!(section_for("odo_start"), SectionKind::Route);
        assert_eq!(section_for("tire_psi"), SectionKind::Route);
        assert_eq!(section_for("team_roles"), SectionKind::Team);
        assert_eq!(section_for("next_day_objectives"), SectionKind::Team);
        assert_eq!(section_for("weather_trends_m_md_e"), SectionKind::Environmental);
        assert_eq!(section_for("terrain_type_tracker"), SectionKind::Environmental);
        assert_eq!(section_for("coolant"), SectionKind::Maintenance);
        assert_eq!(section_for("tires"), SectionKind::Route);
        assert_eq!(section_for("recovery_gear"), SectionKind::Maintenance);
        assert_eq!(
            section_for("self_awareness_journal_reactions_decisions_growth"),
            SectionKind::Leadership
        );
        assert_eq!(section_for("lessons_to_carry_forward"), SectionKind::Leadership);
        assert_eq!(section_for("lessons_learned"), SectionKind::Main);
        assert_eq!(section_for("expedition_leader"), SectionKind::Main);
    }

    #[test]
    fn test_rule_order_route_before_environmental() {
        // "wx_temp_wind_radio_ch" has no route keyword, "distance_today" does.
        assert_eq!(section_for("wx_temp_wind_radio_ch"), SectionKind::Environmental);
        assert_eq!(section_for("distance_today"), SectionKind::Route);
    }

    #[test]
    fn test_organize_keeps_order_and_all_sections() {
        let make = |name: &str| FieldDescriptor {
            name: name.to_string(),
            label: name.to_string(),
            field_type: FieldType::Text,
            page: 1,
        };
        let fields = vec![make("fuel_end"), make("sky"), make("odo_start"), make("camp")];
        let sections = organize(&fields);

        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0].title, "Main Log");
        assert_eq!(sections[0].fields[0].name, "camp");

        let route: Vec<&str> = sections[1].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(route, vec!["fuel_end", "odo_start"]);
        assert_eq!(sections[3].fields.len(), 1);
        assert!(sections[5].fields.is_empty());
    }
}
