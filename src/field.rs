/// Typed field identifiers for the sortable/searchable columns.
///
/// User input arrives as short search keys (`"full_name"`) or dotted column
/// paths (`"biography.fullName"`); both resolve through the fixed tables
/// here instead of reflective lookup. Unknown keys yield `None` and the
/// pipeline treats them as a pass-through.

/// A sortable or searchable column of the character table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    FullName,
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
    Race,
    Gender,
    Height,
    Weight,
    PlaceOfBirth,
    Alignment,
    /// Aggregate powerstats column, sorted by the sum of the six stats.
    StatTotal,
}

/// Coercion class of a field, driving both sort-key derivation and which
/// search operators are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// One of the six integer powerstats.
    Stat,
    /// Paired height field, coerced to centimeters.
    Height,
    /// Paired weight field, coerced to kilograms.
    Weight,
    /// Alignment category, coerced to an ordinal rank.
    Alignment,
    /// Free-text field, compared case-insensitively.
    Text,
    /// Sum of the six powerstats.
    StatTotal,
}

/// The six named powerstats, in table-column order.
pub const STATS: [Field; 6] = [
    Field::Intelligence,
    Field::Strength,
    Field::Speed,
    Field::Durability,
    Field::Power,
    Field::Combat,
];

impl Field {
    /// Resolve a user-facing search key (the `field` query parameter).
    pub fn from_key(key: &str) -> Option<Field> {
        Some(match key {
            "name" => Field::Name,
            "full_name" => Field::FullName,
            "intelligence" => Field::Intelligence,
            "strength" => Field::Strength,
            "speed" => Field::Speed,
            "durability" => Field::Durability,
            "power" => Field::Power,
            "combat" => Field::Combat,
            "race" => Field::Race,
            "gender" => Field::Gender,
            "height" => Field::Height,
            "weight" => Field::Weight,
            "place_of_birth" => Field::PlaceOfBirth,
            "alignment" => Field::Alignment,
            _ => return None,
        })
    }

    /// Resolve a dotted column path (the `sort` query parameter).
    pub fn from_path(path: &str) -> Option<Field> {
        Some(match path {
            "name" => Field::Name,
            "biography.fullName" => Field::FullName,
            "powerstats.intelligence" => Field::Intelligence,
            "powerstats.strength" => Field::Strength,
            "powerstats.speed" => Field::Speed,
            "powerstats.durability" => Field::Durability,
            "powerstats.power" => Field::Power,
            "powerstats.combat" => Field::Combat,
            "appearance.race" => Field::Race,
            "appearance.gender" => Field::Gender,
            "appearance.height" => Field::Height,
            "appearance.weight" => Field::Weight,
            "biography.placeOfBirth" => Field::PlaceOfBirth,
            "biography.alignment" => Field::Alignment,
            "powerstats" => Field::StatTotal,
            _ => return None,
        })
    }

    /// The dotted path used to resolve this field against a record.
    pub fn path(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::FullName => "biography.fullName",
            Field::Intelligence => "powerstats.intelligence",
            Field::Strength => "powerstats.strength",
            Field::Speed => "powerstats.speed",
            Field::Durability => "powerstats.durability",
            Field::Power => "powerstats.power",
            Field::Combat => "powerstats.combat",
            Field::Race => "appearance.race",
            Field::Gender => "appearance.gender",
            Field::Height => "appearance.height",
            Field::Weight => "appearance.weight",
            Field::PlaceOfBirth => "biography.placeOfBirth",
            Field::Alignment => "biography.alignment",
            Field::StatTotal => "powerstats",
        }
    }

    pub fn class(&self) -> FieldClass {
        match self {
            Field::Intelligence
            | Field::Strength
            | Field::Speed
            | Field::Durability
            | Field::Power
            | Field::Combat => FieldClass::Stat,
            Field::Height => FieldClass::Height,
            Field::Weight => FieldClass::Weight,
            Field::Alignment => FieldClass::Alignment,
            Field::StatTotal => FieldClass::StatTotal,
            Field::Name | Field::FullName | Field::Race | Field::Gender | Field::PlaceOfBirth => {
                FieldClass::Text
            }
        }
    }

    /// True for fields whose search semantics are numeric: the six stats
    /// plus height and weight after unit coercion.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.class(),
            FieldClass::Stat | FieldClass::Height | FieldClass::Weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_path_agree() {
        for key in [
            "name",
            "full_name",
            "intelligence",
            "strength",
            "speed",
            "durability",
            "power",
            "combat",
            "race",
            "gender",
            "height",
            "weight",
            "place_of_birth",
            "alignment",
        ] {
            let field = Field::from_key(key).unwrap();
            assert_eq!(Field::from_path(field.path()), Some(field), "key {key}");
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(Field::from_key("powerstats"), None);
        assert_eq!(Field::from_key("fullName"), None);
        assert_eq!(Field::from_path("biography.alignments"), None);
    }

    #[test]
    fn aggregate_stats_path() {
        assert_eq!(Field::from_path("powerstats"), Some(Field::StatTotal));
        assert_eq!(Field::StatTotal.class(), FieldClass::StatTotal);
        assert!(!Field::StatTotal.is_numeric());
    }

    #[test]
    fn numeric_classes() {
        assert!(Field::Strength.is_numeric());
        assert!(Field::Height.is_numeric());
        assert!(Field::Weight.is_numeric());
        assert!(!Field::Name.is_numeric());
        assert!(!Field::Alignment.is_numeric());
    }
}
