// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] over rows of `T`.
pub trait Column<T> {
    fn name(&self) -> &'static str;
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Plain text table with a bold header, padded by display width.
pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<_> = self.columns.iter().map(|c| c.name().width()).collect();
        for row in cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();
        let widths = self.widths(&cells);
        let last = self.columns.len().saturating_sub(1);

        for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
            let cell = pad(col.name(), *width, col.padding_direction(), i == last);
            write!(f, "{}", cell.bold())?;
            write!(f, "{}", if i == last { "\n" } else { self.separator })?;
        }

        for (row, data) in cells.iter().zip(self.data) {
            for (i, ((col, cell), width)) in self.columns.iter().zip(row).zip(&widths).enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                match col.get_color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                write!(f, "{}", if i == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

// Width-aware padding, `format!` widths count chars rather than columns.
fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // the last left-aligned column needs no trailing spaces
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}
