// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status block parsing.

use crate::error::ParseError;
use crate::types::OutletIndex;

use super::extract::STATUS_BLOCK;

/// Positional values of the `<pot0>` block in `/status.xml`.
///
/// The block is a flat comma-separated list. Element 2 is the current draw in
/// amps; outlet codes start at [`StatusBlock::OUTLET_CODE_OFFSET`].
///
/// # Examples
///
/// ```
/// use serverlink_pdu::parse::StatusBlock;
/// use serverlink_pdu::types::OutletIndex;
///
/// let xml = "<response><pot0>0,0,1.5,0,0,0,0,0,0,0,1,0</pot0></response>";
/// let block = StatusBlock::parse(xml).unwrap();
/// assert_eq!(block.current_draw().unwrap(), 1.5);
/// assert_eq!(block.outlet_code(OutletIndex::new(0).unwrap()).unwrap(), 1);
/// assert_eq!(block.outlet_code(OutletIndex::new(1).unwrap()).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBlock {
    values: Vec<String>,
}

impl StatusBlock {
    /// Position of the current draw reading.
    pub const CURRENT_DRAW_POSITION: usize = 2;
    /// Position of the first outlet code.
    pub const OUTLET_CODE_OFFSET: usize = 10;

    /// Extracts the block from a status document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the document has no `<pot0>` block.
    pub fn parse(document: &str) -> Result<Self, ParseError> {
        let raw = STATUS_BLOCK
            .find(document)
            .ok_or_else(|| ParseError::MissingField(STATUS_BLOCK.name().to_string()))?;

        let values = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(|v| v.trim().to_string()).collect()
        };

        Ok(Self { values })
    }

    /// Returns the number of values in the block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw value at `position`.
    #[must_use]
    pub fn raw(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    /// Checks that codes for `outlet_count` outlets are present.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the block is too short.
    pub fn ensure_outlets(&self, outlet_count: usize) -> Result<(), ParseError> {
        let required = outlet_count + Self::OUTLET_CODE_OFFSET;
        if self.values.len() < required {
            return Err(ParseError::UnexpectedFormat(format!(
                "status block has {} values, {required} needed for {outlet_count} outlets",
                self.values.len()
            )));
        }
        Ok(())
    }

    /// Returns the raw current draw value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the block is too short.
    pub fn current_draw_raw(&self) -> Result<&str, ParseError> {
        self.raw(Self::CURRENT_DRAW_POSITION)
            .ok_or_else(|| ParseError::MissingField("current draw".to_string()))
    }

    /// Returns the current draw in amps.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the value is missing or not a number.
    pub fn current_draw(&self) -> Result<f64, ParseError> {
        let raw = self.current_draw_raw()?;
        raw.parse::<f64>().map_err(|e| ParseError::InvalidValue {
            field: "current draw".to_string(),
            message: format!("{raw:?}: {e}"),
        })
    }

    /// Returns the raw code reported for an outlet.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the code is missing or not an unsigned integer.
    pub fn outlet_code(&self, index: OutletIndex) -> Result<u32, ParseError> {
        let field = format!("outlet code {}", index.number());
        let raw = self
            .raw(index.value() + Self::OUTLET_CODE_OFFSET)
            .ok_or_else(|| ParseError::MissingField(field.clone()))?;
        raw.parse::<u32>().map_err(|e| ParseError::InvalidValue {
            field,
            message: format!("{raw:?}: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> OutletIndex {
        OutletIndex::new(i).unwrap()
    }

    #[test]
    fn missing_block() {
        let result = StatusBlock::parse("<response></response>");
        assert!(matches!(result, Err(ParseError::MissingField(f)) if f == "pot0"));
    }

    #[test]
    fn empty_block_is_too_short() {
        let block = StatusBlock::parse("<pot0></pot0>").unwrap();
        assert!(block.is_empty());
        assert!(block.ensure_outlets(8).is_err());
        assert!(block.current_draw().is_err());
    }

    #[test]
    fn ensure_outlets_bounds() {
        let values = vec!["0"; 18].join(",");
        let block = StatusBlock::parse(&format!("<pot0>{values}</pot0>")).unwrap();
        assert!(block.ensure_outlets(8).is_ok());
        assert!(matches!(
            block.ensure_outlets(9),
            Err(ParseError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn outlet_code_out_of_range() {
        let block = StatusBlock::parse("<pot0>0,0,0.2,0,0,0,0,0,0,0,1</pot0>").unwrap();
        assert_eq!(block.outlet_code(idx(0)).unwrap(), 1);
        assert!(matches!(
            block.outlet_code(idx(1)),
            Err(ParseError::MissingField(_))
        ));
    }

    #[test]
    fn outlet_code_not_integer() {
        let block = StatusBlock::parse("<pot0>0,0,0.2,0,0,0,0,0,0,0,1.5</pot0>").unwrap();
        assert!(matches!(
            block.outlet_code(idx(0)),
            Err(ParseError::InvalidValue { .. })
        ));
    }
}
