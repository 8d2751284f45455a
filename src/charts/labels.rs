use crate::models::Variable;

/// Human-readable title label for a variable column; unknown names map to themselves
pub fn variable_label(name: &str) -> &str {
    match Variable::parse(name) {
        Some(variable) => variable.label(),
        None => name,
    }
}

/// `"PM2.5, CO"` style list used in chart titles
pub fn join_labels<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_variable_labels() {
        assert_eq!(variable_label("TEMP"), "Suhu");
        assert_eq!(variable_label("PRES"), "Tekanan");
        assert_eq!(variable_label("DEWP"), "Titik Embun");
        assert_eq!(variable_label("RAIN"), "Hujan");
        assert_eq!(variable_label("wd"), "Arah Angin");
        assert_eq!(variable_label("WSPM"), "Kecepatan Angin");
    }

    #[test]
    fn test_unknown_variable_passes_through() {
        assert_eq!(variable_label("PM2.5"), "PM2.5");
        assert_eq!(variable_label("temp"), "temp");
    }

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels(&["PM2.5"]), "PM2.5");
        assert_eq!(join_labels(&["PM2.5", "CO"]), "PM2.5, CO");
    }
}
