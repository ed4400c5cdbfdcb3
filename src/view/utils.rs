//! Utility functions for laying out console tables

/// Narrowest a column is squeezed to before the table is allowed to overflow
const MIN_COLUMN_WIDTH: usize = 3;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Column widths that fit `available` cells, shrinking the widest column first.
pub fn fit_column_widths(natural: &[usize], available: usize) -> Vec<usize> {
    let mut widths = natural.to_vec();
    while widths.iter().sum::<usize>() > available {
        let Some((widest, &width)) = widths.iter().enumerate().max_by_key(|&(_, w)| *w) else {
            break;
        };
        if width <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[widest] = width - 1;
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_strings_are_truncated_with_ellipsis() {
        assert_eq!(truncate_string("Radiohead", 6), "Rad...");
        assert_eq!(truncate_string("Muse", 6), "Muse  ");
    }

    #[test]
    fn widths_fit_by_shrinking_the_widest_column() {
        assert_eq!(fit_column_widths(&[3, 10, 40], 60), vec![3, 10, 40]);
        assert_eq!(fit_column_widths(&[3, 10, 40], 33), vec![3, 10, 20]);
        assert_eq!(fit_column_widths(&[3, 30, 30], 23), vec![3, 10, 10]);
    }

    #[test]
    fn widths_never_drop_below_minimum() {
        assert_eq!(fit_column_widths(&[5, 5], 2), vec![3, 3]);
    }
}
