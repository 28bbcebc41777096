//! The uncommitted waste list of the active entry screen.

use crate::catalog::{RESERVED_CATEGORY, Catalog};
use crate::errors::EditorError;
use crate::models::{Quantity, RESERVED_PREFIX, WasteEntry, round_quantity};
use crate::store::validate_segment;
use std::mem;

#[derive(Debug, Clone)]
pub struct WasteList {
    pending_amount: String,
    category: usize,
    category_count: usize,
    entries: Vec<WasteEntry>,
}

impl WasteList {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            pending_amount: String::new(),
            category: 0,
            category_count: catalog.len(),
            entries: Vec::new(),
        }
    }

    pub fn pending_amount(&self) -> &str {
        &self.pending_amount
    }

    pub fn category(&self) -> usize {
        self.category
    }

    pub fn entries(&self) -> &[WasteEntry] {
        &self.entries
    }

    fn reserved(&self) -> bool {
        self.category == RESERVED_CATEGORY
    }

    /// Appends one key of the amount pad. The decimal point is only offered
    /// for reserved-waste ingredients.
    pub fn add_digit(&mut self, digit: char) -> Result<(), EditorError> {
        let accepted = digit.is_ascii_digit() || (digit == '.' && self.reserved());
        if !accepted {
            return Err(EditorError::InvalidDigit(digit));
        }
        self.pending_amount.push(digit);
        Ok(())
    }

    pub fn select_category(&mut self, index: usize) -> Result<(), EditorError> {
        if index >= self.category_count {
            return Err(EditorError::UnknownCategory(index));
        }
        self.category = index;
        Ok(())
    }

    /// Adds `product` with the typed amount (1 when nothing was typed) and
    /// clears the amount pad, whether or not the amount was usable.
    pub fn select_product(&mut self, product: &str) -> Result<&WasteEntry, EditorError> {
        let typed = mem::take(&mut self.pending_amount);
        let amount = resolve_amount(&typed)?;

        let key = if self.reserved() {
            format!("{RESERVED_PREFIX}{product}")
        } else {
            product.to_string()
        };
        validate_segment(&key).map_err(|_| EditorError::InvalidProduct(product.to_string()))?;

        let index = match self.entries.iter().position(|entry| entry.product == key) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.amount = round_quantity(entry.amount + amount);
                index
            }
            None => {
                self.entries.push(WasteEntry {
                    product: key,
                    amount,
                });
                self.entries.len() - 1
            }
        };
        Ok(&self.entries[index])
    }

    /// Clears the amount pad only; the list is untouched.
    pub fn clear(&mut self) {
        self.pending_amount.clear();
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Hands the list over for saving and leaves it empty.
    pub fn take(&mut self) -> Vec<WasteEntry> {
        mem::take(&mut self.entries)
    }
}

fn resolve_amount(typed: &str) -> Result<Quantity, EditorError> {
    if typed.is_empty() {
        return Ok(1.0);
    }
    match typed.parse::<Quantity>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(EditorError::InvalidAmount(typed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> WasteList {
        WasteList::new(&Catalog::bundled())
    }

    fn type_amount(list: &mut WasteList, amount: &str) {
        for digit in amount.chars() {
            list.add_digit(digit).unwrap();
        }
    }

    #[test]
    fn repeated_selection_sums_resolved_amounts() {
        let mut list = editor();
        list.select_product("Burger").unwrap();
        type_amount(&mut list, "12");
        list.select_product("Burger").unwrap();
        type_amount(&mut list, "3");
        list.select_product("Burger").unwrap();

        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.entries()[0].amount, 16.0);
    }

    #[test]
    fn digits_concatenate_until_product_is_chosen() {
        let mut list = editor();
        type_amount(&mut list, "25");
        assert_eq!(list.pending_amount(), "25");
        assert!(list.entries().is_empty());

        let entry = list.select_product("Cola").unwrap();
        assert_eq!(entry.amount, 25.0);
        assert_eq!(list.pending_amount(), "");
    }

    #[test]
    fn reserved_category_prefixes_keys() {
        let mut list = editor();
        list.select_product("Ketchup").unwrap();
        list.select_category(RESERVED_CATEGORY).unwrap();
        list.select_product("Ketchup").unwrap();

        let keys: Vec<&str> = list.entries().iter().map(|e| e.product.as_str()).collect();
        assert_eq!(keys, vec!["Ketchup", "RW-Ketchup"]);
    }

    #[test]
    fn decimal_point_only_for_reserved_category() {
        let mut list = editor();
        assert_eq!(list.add_digit('.'), Err(EditorError::InvalidDigit('.')));

        list.select_category(RESERVED_CATEGORY).unwrap();
        type_amount(&mut list, "1.5");
        let entry = list.select_product("Lettuce").unwrap();
        assert_eq!(entry.product, "RW-Lettuce");
        assert_eq!(entry.amount, 1.5);
    }

    #[test]
    fn fractional_merges_stay_at_three_decimals() {
        let mut list = editor();
        list.select_category(RESERVED_CATEGORY).unwrap();
        type_amount(&mut list, "0.1");
        list.select_product("Lettuce").unwrap();
        type_amount(&mut list, "0.2");
        let entry = list.select_product("Lettuce").unwrap();
        assert_eq!(entry.amount, 0.3);
    }

    #[test]
    fn unusable_amount_is_rejected_and_pad_cleared() {
        let mut list = editor();
        list.select_category(RESERVED_CATEGORY).unwrap();
        type_amount(&mut list, "1..2");
        assert_eq!(
            list.select_product("Bun"),
            Err(EditorError::InvalidAmount("1..2".to_string()))
        );
        assert_eq!(list.pending_amount(), "");
        assert!(list.entries().is_empty());

        type_amount(&mut list, "0");
        assert!(list.select_product("Bun").is_err());
    }

    #[test]
    fn clear_only_touches_pad_and_reset_only_list() {
        let mut list = editor();
        list.select_product("Wrap").unwrap();
        type_amount(&mut list, "4");

        list.clear();
        assert_eq!(list.pending_amount(), "");
        assert_eq!(list.entries().len(), 1);

        type_amount(&mut list, "4");
        list.reset();
        assert!(list.entries().is_empty());
        assert_eq!(list.pending_amount(), "4");
    }

    #[test]
    fn unknown_category_and_bad_product_names() {
        let mut list = editor();
        assert_eq!(list.select_category(7), Err(EditorError::UnknownCategory(7)));
        assert!(matches!(
            list.select_product("a/b"),
            Err(EditorError::InvalidProduct(_))
        ));
    }

    #[test]
    fn take_empties_list() {
        let mut list = editor();
        list.select_product("Tea").unwrap();
        let taken = list.take();
        assert_eq!(taken.len(), 1);
        assert!(list.entries().is_empty());
    }
}
