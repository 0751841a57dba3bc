//! Per-column view fragments
//!
//! Each classified column contributes one fragment to every shared view
//! token. The markup for the index table is chosen from small tables keyed
//! on [`WidgetKind`]; show rows and form inputs come from stubs so they can be
//! overridden.

use crate::classifier::{column_title, field_widget, WidgetKind};
use crate::render::{render_with, CommonTokens, FieldTokens};
use crate::schema::{ColumnDescriptor, SqlType};

/// Indentation of `<th>` cells in the index stub
pub const HEAD_INDENT: usize = 40;

/// Indentation of `<td>` cells in the index stub
pub const BODY_INDENT: usize = 44;

/// Indentation of show rows
pub const ROW_INDENT: usize = 24;

/// Indentation of form inputs
pub const FORM_INDENT: usize = 8;

/// Index table cell for a widget
const fn body_cell(widget: WidgetKind) -> &'static str {
    match widget {
        WidgetKind::Checkbox => {
            "<td>{{ ${{modelNameLowerCase}}->{{column}} ? __('Yes') : __('No') }}</td>"
        }
        WidgetKind::TextArea => "<td>{{ Str::limit(${{modelNameLowerCase}}->{{column}}, 50) }}</td>",
        WidgetKind::Text | WidgetKind::Date | WidgetKind::Select => {
            "<td>{{ ${{modelNameLowerCase}}->{{column}} }}</td>"
        }
    }
}

/// Filter input in the index table header for a widget
const fn filter_cell(widget: WidgetKind) -> &'static str {
    match widget {
        WidgetKind::Text | WidgetKind::TextArea => {
            "<th><input type=\"text\" name=\"{{column}}\" form=\"filters\" value=\"{{ request('{{column}}') }}\" class=\"form-control form-control-sm\" placeholder=\"{{title}}\"></th>"
        }
        WidgetKind::Date => {
            "<th><input type=\"{{inputType}}\" name=\"{{column}}\" form=\"filters\" value=\"{{ request('{{column}}') }}\" class=\"form-control form-control-sm\"></th>"
        }
        WidgetKind::Checkbox => {
            "<th><select name=\"{{column}}\" form=\"filters\" class=\"form-select form-select-sm\"><option value=\"\"></option><option value=\"1\" @selected(request('{{column}}') === '1')>{{ __('Yes') }}</option><option value=\"0\" @selected(request('{{column}}') === '0')>{{ __('No') }}</option></select></th>"
        }
        WidgetKind::Select => {
            "<th><select name=\"{{column}}\" form=\"filters\" class=\"form-select form-select-sm\"><option value=\"\"></option>{{options}}</select></th>"
        }
    }
}

/// HTML `type` of the form input for a column
///
/// | SQL type             | Input            |
/// |----------------------|------------------|
/// | date                 | `date`           |
/// | datetime, timestamp  | `datetime-local` |
/// | time                 | `time`           |
/// | anything else        | `text`           |
#[must_use]
pub const fn input_type(sql_type: &SqlType) -> &'static str {
    match sql_type {
        SqlType::Date => "date",
        SqlType::DateTime | SqlType::Timestamp => "datetime-local",
        SqlType::Time => "time",
        _ => "text",
    }
}

/// `format()` pattern for a column the model casts to a date, `None` otherwise
///
/// Time columns are not cast and already come back as `H:i:s` strings.
#[must_use]
pub const fn value_format(sql_type: &SqlType) -> Option<&'static str> {
    match sql_type {
        SqlType::Date => Some("Y-m-d"),
        SqlType::DateTime | SqlType::Timestamp => Some("Y-m-d\\TH:i"),
        _ => None,
    }
}

/// Filter input type: days for dates and timestamps, times for time columns
const fn filter_input_type(sql_type: &SqlType) -> &'static str {
    match sql_type {
        SqlType::Time => "time",
        _ => "date",
    }
}

/// `<th>Title</th>`
#[must_use]
pub fn head_fragment(column: &ColumnDescriptor) -> String {
    indent(
        &format!("<th>{}</th>", column_title(&column.name)),
        HEAD_INDENT,
    )
}

/// `<td>` echoing the column of the current row
#[must_use]
pub fn body_fragment(common: &CommonTokens, column: &ColumnDescriptor) -> String {
    let tokens = field_tokens(common, column, String::new(), "text");
    indent(
        &render_with(body_cell(field_widget(column)), &tokens),
        BODY_INDENT,
    )
}

/// Filter input bound to the index filter form
#[must_use]
pub fn filter_fragment(common: &CommonTokens, column: &ColumnDescriptor) -> String {
    let options = select_options(column, &format!("request('{}')", column.name));
    let tokens = field_tokens(common, column, options, filter_input_type(&column.sql_type));
    indent(
        &render_with(filter_cell(field_widget(column)), &tokens),
        HEAD_INDENT,
    )
}

/// Read-only row of the show view, rendered from the `views/view-field` stub
#[must_use]
pub fn view_field_fragment(
    template: &str,
    common: &CommonTokens,
    column: &ColumnDescriptor,
) -> String {
    let tokens = field_tokens(common, column, String::new(), "text");
    indent(&render_with(template, &tokens), ROW_INDENT)
}

/// Form input rendered from the stub matching the column's widget
#[must_use]
pub fn form_field_fragment(
    template: &str,
    common: &CommonTokens,
    column: &ColumnDescriptor,
) -> String {
    let current = format!("old('{}', ${}?->{})", column.name, common.lower, column.name);
    let options = indent(&select_options(column, &current), FORM_INDENT);
    let tokens = field_tokens(common, column, options, input_type(&column.sql_type));
    indent(&render_with(template, &tokens), FORM_INDENT)
}

/// `<option>` per enum variant, selected when `current` equals its value
///
/// Empty for anything that is not an enum.
#[must_use]
pub fn select_options(column: &ColumnDescriptor, current: &str) -> String {
    let SqlType::Enum(variants) = &column.sql_type else {
        return String::new();
    };

    variants
        .iter()
        .map(|variant| {
            format!(
                "<option value=\"{variant}\" @selected({current} === '{variant}')>{}</option>",
                column_title(variant)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_tokens<'a>(
    common: &'a CommonTokens,
    column: &ColumnDescriptor,
    options: String,
    input_type: &'static str,
) -> FieldTokens<'a> {
    let value = match value_format(&column.sql_type) {
        Some(format) => format!("${}?->{}?->format('{format}')", common.lower, column.name),
        None => format!("${}?->{}", common.lower, column.name),
    };

    FieldTokens {
        common,
        title: column_title(&column.name),
        column: column.name.clone(),
        options,
        input_type,
        value,
    }
}

/// Prefix every non-empty line with `width` spaces
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
