use crate::types::err::{self};

/// A bounded option, with a name as used when setting the option from text.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    /// Sets the value of the option, if the value is within the bounds of the option.
    pub fn set(&mut self, value: T) -> Result<(), err::ConfigError> {
        if value < self.min || self.max < value {
            return Err(err::ConfigError::OutOfBounds { option: self.name });
        }
        self.value = value;
        Ok(())
    }
}

impl<T: Clone + PartialOrd + std::str::FromStr> ConfigOption<T> {
    /// Sets the value of the option from a string.
    pub fn set_str(&mut self, value: &str) -> Result<(), err::ConfigError> {
        match value.trim().parse::<T>() {
            Ok(v) => self.set(v),
            Err(_) => Err(err::ConfigError::InvalidValue {
                option: self.name,
                value: value.to_string(),
            }),
        }
    }
}
