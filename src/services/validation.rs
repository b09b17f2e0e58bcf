/// Rejects strings that are empty once whitespace is stripped
pub fn not_blank(value: &str, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

/// Like [`not_blank`], but an absent value passes
pub fn not_blank_opt(value: &Option<String>, context: &()) -> garde::Result {
    match value {
        Some(value) => not_blank(value, context),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jane", &()).is_ok());
        assert!(not_blank("", &()).is_err());
        assert!(not_blank(" \t\n", &()).is_err());
        assert!(not_blank_opt(&None, &()).is_ok());
        assert!(not_blank_opt(&Some(" ".to_string()), &()).is_err());
    }
}
