use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Result, TrackerError};
use crate::models::{Grade, Subject};

use Grade::*;
use Subject::*;

const UNITS: &[(Grade, Subject, &[&str])] = &[
    (Grade1, Japanese, &["Hiragana", "Katakana", "Reading Aloud", "Picture Diary"]),
    (Grade1, Math, &["Numbers to 10", "Addition", "Subtraction", "Comparing Length", "Numbers to 100"]),
    (Grade1, Science, &["Seasons Around Us", "Growing Morning Glories"]),
    (Grade1, SocialStudies, &["My School", "Neighborhood Walk"]),
    (Grade1, English, &["Greetings", "Colors", "Numbers 1-10"]),
    (Grade2, Japanese, &["Kanji Basics", "Story Sequencing", "Letter Writing"]),
    (Grade2, Math, &["Addition with Carrying", "Subtraction with Borrowing", "Multiplication", "Clocks", "Length in cm and mm"]),
    (Grade2, Science, &["Vegetable Garden", "Small Creatures"]),
    (Grade2, SocialStudies, &["Town Exploration", "Public Facilities"]),
    (Grade2, English, &["Animals", "Food", "Days of the Week"]),
    (Grade3, Japanese, &["Kanji Grade 3", "Dictionary Skills", "Report Writing", "Romaji"]),
    (Grade3, Math, &["Multiplication", "Division", "Large Numbers", "Fractions", "Decimals", "Circles and Spheres"]),
    (Grade3, Science, &["Insects", "Light and Shadows", "Magnets", "Electric Circuits"]),
    (Grade3, SocialStudies, &["Maps and Symbols", "Local Shops", "Farms and Factories"]),
    (Grade3, English, &["Alphabet", "Shapes", "What Do You Like?"]),
    (Grade4, Japanese, &["Kanji Grade 4", "Idioms", "Newspaper Making"]),
    (Grade4, Math, &["Long Division", "Angles", "Area", "Fractions", "Decimals", "Line Graphs"]),
    (Grade4, Science, &["Weather and Temperature", "The Moon and Stars", "States of Water", "Human Body"]),
    (Grade4, SocialStudies, &["Prefectures", "Water Supply", "Waste Disposal"]),
    (Grade4, English, &["Weather", "Time", "School Subjects"]),
    (Grade5, Japanese, &["Kanji Grade 5", "Honorifics", "Debate"]),
    (Grade5, Math, &["Decimal Multiplication", "Decimal Division", "Fractions", "Percentages", "Volume", "Area of Triangles"]),
    (Grade5, Science, &["Germination", "Weather Changes", "Pendulums", "Electromagnets", "Dissolving"]),
    (Grade5, SocialStudies, &["Japan's Land", "Agriculture", "Industry", "Information Society"]),
    (Grade5, English, &["Birthdays", "Directions", "Can You...?"]),
    (Grade6, Japanese, &["Kanji Grade 6", "Classical Poetry", "Persuasive Essays"]),
    (Grade6, Math, &["Fraction Multiplication", "Fraction Division", "Ratios", "Proportions", "Speed", "Data Analysis"]),
    (Grade6, Science, &["Combustion", "Human Body Systems", "Levers", "Electricity Generation"]),
    (Grade6, SocialStudies, &["Japanese History", "Government", "Japan and the World"]),
    (Grade6, English, &["My Town", "Summer Vacation", "Future Dreams"]),
];

const RELATED: &[(&str, &[&str])] = &[
    ("Division", &["Multiplication", "Addition", "Subtraction"]),
    ("Long Division", &["Division", "Multiplication"]),
    ("Multiplication", &["Addition with Carrying", "Addition"]),
    ("Addition with Carrying", &["Addition", "Numbers to 100"]),
    ("Subtraction with Borrowing", &["Subtraction", "Numbers to 100"]),
    ("Fractions", &["Division", "Multiplication"]),
    ("Decimals", &["Fractions", "Large Numbers"]),
    ("Decimal Multiplication", &["Decimals", "Multiplication"]),
    ("Decimal Division", &["Decimals", "Long Division"]),
    ("Percentages", &["Decimals", "Fractions"]),
    ("Fraction Multiplication", &["Fractions", "Multiplication"]),
    ("Fraction Division", &["Fraction Multiplication", "Fractions", "Division"]),
    ("Ratios", &["Fractions", "Division"]),
    ("Proportions", &["Ratios", "Line Graphs"]),
    ("Speed", &["Decimal Division", "Proportions"]),
    ("Area", &["Multiplication", "Angles"]),
    ("Area of Triangles", &["Area", "Angles"]),
    ("Volume", &["Area", "Decimal Multiplication"]),
    ("Electromagnets", &["Magnets", "Electric Circuits"]),
    ("Electricity Generation", &["Electromagnets", "Electric Circuits"]),
    ("Kanji Grade 4", &["Kanji Grade 3"]),
    ("Kanji Grade 5", &["Kanji Grade 4"]),
    ("Kanji Grade 6", &["Kanji Grade 5"]),
    ("Honorifics", &["Letter Writing"]),
];

/// Read-only curriculum tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    units: HashMap<(Grade, Subject), Vec<String>>,
    related: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Catalog::builtin)
    }

    pub fn builtin() -> Self {
        let units = UNITS
            .iter()
            .map(|(grade, subject, names)| ((*grade, *subject), to_owned(names)))
            .collect();
        let related = RELATED
            .iter()
            .map(|(unit, names)| (unit.to_string(), to_owned(names)))
            .collect();
        Self { units, related }
    }

    pub fn from_tables(
        units: HashMap<(Grade, Subject), Vec<String>>,
        related: HashMap<String, Vec<String>>,
    ) -> Self {
        Self { units, related }
    }

    pub fn units_for(&self, grade: Grade, subject: Subject) -> Result<&[String]> {
        self.units
            .get(&(grade, subject))
            .map(Vec::as_slice)
            .ok_or(TrackerError::NotFound { grade, subject })
    }

    pub fn units_for_or_empty(&self, grade: Grade, subject: Subject) -> &[String] {
        self.units_for(grade, subject).unwrap_or(&[])
    }

    /// Units worth revisiting before `unit`. Most units have none.
    pub fn related_to(&self, unit: &str) -> &[String] {
        self.related.get(unit.trim()).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
