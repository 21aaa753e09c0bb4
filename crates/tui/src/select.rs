use crate::host::HostUi;
use crate::i18n::keys;
use crate::promise::{pending, Resolver};
use serde_json::Value;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub raw: Value,
}

impl SelectableItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            raw: Value::Null,
        }
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = raw;
        self
    }

    fn field(&self, field: &SearchField) -> Option<String> {
        match field {
            SearchField::Title => Some(self.title.clone()),
            SearchField::Description => Some(self.description.clone()),
            SearchField::Id => Some(self.id.clone()),
            SearchField::Field(name) => self.raw.get(name).map(value_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            id: "{id}".to_string(),
            title: "{title}".to_string(),
            description: "{description}".to_string(),
        }
    }
}

impl FieldMapping {
    pub fn render(template: &str, record: &Value) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            if let Some(value) = record.get(&after[..close]) {
                out.push_str(&value_text(value));
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

pub fn items_from_records(records: &[Value], mapping: &FieldMapping) -> Vec<SelectableItem> {
    records
        .iter()
        .map(|record| SelectableItem {
            id: FieldMapping::render(&mapping.id, record),
            title: FieldMapping::render(&mapping.title, record),
            description: FieldMapping::render(&mapping.description, record),
            raw: record.clone(),
        })
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Description,
    Id,
    Field(String),
}

#[derive(Debug, Clone)]
pub struct SelectConfig {
    pub title: Option<String>,
    pub no_data_text: Option<String>,
    pub search_fields: Vec<SearchField>,
    pub multi_select: bool,
    pub case_sensitive: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            title: None,
            no_data_text: None,
            search_fields: vec![SearchField::Title, SearchField::Description],
            multi_select: false,
            case_sensitive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    Single(SelectableItem),
    Multiple(Vec<SelectableItem>),
    Cancelled,
}

impl SelectionResult {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SelectionResult::Cancelled)
    }
}

#[derive(Debug)]
pub struct SelectDialog {
    pub title: String,
    pub no_data_text: String,
    pub multi_select: bool,
    items: Vec<SelectableItem>,
    search_fields: Vec<SearchField>,
    case_sensitive: bool,
    query: String,
    visible: Vec<usize>,
    checked: Vec<bool>,
    cursor: usize,
    resolver: Resolver<SelectionResult>,
}

impl SelectDialog {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.refilter();
    }

    pub fn pop_query_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let needle = if self.case_sensitive {
            self.query.clone()
        } else {
            self.query.to_lowercase()
        };
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || self.matches(item, &needle))
            .map(|(index, _)| index)
            .collect();
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
        tracing::trace!(query = %self.query, visible = self.visible.len(), "selection filtered");
    }

    fn matches(&self, item: &SelectableItem, needle: &str) -> bool {
        self.search_fields.iter().any(|field| {
            item.field(field).is_some_and(|text| {
                if self.case_sensitive {
                    text.contains(needle)
                } else {
                    text.to_lowercase().contains(needle)
                }
            })
        })
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &SelectableItem> + '_ {
        self.visible.iter().map(|&index| &self.items[index])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_checked(&self, visible_index: usize) -> bool {
        self.visible
            .get(visible_index)
            .is_some_and(|&index| self.checked[index])
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn toggle(&mut self) {
        let Some(&index) = self.visible.get(self.cursor) else {
            return;
        };
        let next = !self.checked[index];
        if !self.multi_select {
            self.checked.iter_mut().for_each(|checked| *checked = false);
        }
        self.checked[index] = next;
    }

    /// Returns `false` if nothing was resolved: already settled, or single
    /// mode with no visible item under the cursor.
    pub fn confirm(&mut self) -> bool {
        if self.resolver.is_settled() {
            return false;
        }
        let result = if self.multi_select {
            SelectionResult::Multiple(
                self.items
                    .iter()
                    .zip(&self.checked)
                    .filter(|(_, checked)| **checked)
                    .map(|(item, _)| item.clone())
                    .collect(),
            )
        } else {
            let checked = self.checked.iter().position(|checked| *checked);
            let chosen = checked.or_else(|| self.visible.get(self.cursor).copied());
            match chosen {
                Some(index) => SelectionResult::Single(self.items[index].clone()),
                None => return false,
            }
        };
        tracing::debug!(?result, "selection confirmed");
        self.resolver.resolve(result)
    }

    pub fn cancel(&mut self) -> bool {
        self.resolver.resolve(SelectionResult::Cancelled)
    }

    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }
}

pub fn select_from(
    host: &dyn HostUi,
    items: Vec<SelectableItem>,
    config: SelectConfig,
) -> impl Future<Output = SelectionResult> {
    let (resolver, pending) = pending();
    let title = config
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| host.text(keys::DIALOG_TITLE, &[]));
    let no_data_text = config
        .no_data_text
        .unwrap_or_else(|| host.text(keys::DIALOG_NO_DATA_FOUND, &[]));
    let checked = vec![false; items.len()];
    let visible = (0..items.len()).collect();
    tracing::debug!(%title, items = items.len(), multi = config.multi_select, "presenting selection");
    host.present_select(SelectDialog {
        title,
        no_data_text,
        multi_select: config.multi_select,
        items,
        search_fields: config.search_fields,
        case_sensitive: config.case_sensitive,
        query: String::new(),
        visible,
        checked,
        cursor: 0,
        resolver,
    });
    async move { pending.await.unwrap_or(SelectionResult::Cancelled) }
}

#[cfg(test)]
mod tests {
    use super::{
        items_from_records, select_from, FieldMapping, SearchField, SelectConfig, SelectableItem,
        SelectionResult,
    };
    use crate::host::testing::RecordingHost;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fruit() -> Vec<SelectableItem> {
        vec![
            SelectableItem::new("1", "Apple", "red"),
            SelectableItem::new("2", "Banana", "yellow"),
            SelectableItem::new("3", "Cherry", "red"),
        ]
    }

    fn titles<'a>(items: impl Iterator<Item = &'a SelectableItem>) -> Vec<&'a str> {
        items.map(|item| item.title.as_str()).collect()
    }

    #[test]
    fn query_matches_any_configured_field_and_empty_restores() {
        let host = RecordingHost::default();
        let _result = select_from(&host, fruit(), SelectConfig::default());
        let mut dialog = host.take_select();

        dialog.set_query("RED");
        assert_eq!(titles(dialog.visible_items()), vec!["Apple", "Cherry"]);
        dialog.set_query("an");
        assert_eq!(titles(dialog.visible_items()), vec!["Banana"]);
        dialog.set_query("zzz");
        assert_eq!(dialog.visible_len(), 0);
        dialog.set_query("");
        assert_eq!(titles(dialog.visible_items()), vec!["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn case_sensitive_and_custom_fields() {
        let host = RecordingHost::default();
        let items = vec![
            SelectableItem::new("A-1", "Apple", "").with_raw(json!({"origin": "Chile"})),
            SelectableItem::new("B-2", "Banana", "").with_raw(json!({"origin": "Ecuador"})),
        ];
        let config = SelectConfig {
            search_fields: vec![SearchField::Id, SearchField::Field("origin".to_string())],
            case_sensitive: true,
            ..SelectConfig::default()
        };
        let _result = select_from(&host, items, config);
        let mut dialog = host.take_select();
        dialog.set_query("Ecu");
        assert_eq!(titles(dialog.visible_items()), vec!["Banana"]);
        dialog.set_query("ecu");
        assert_eq!(dialog.visible_len(), 0);
        dialog.set_query("A-");
        assert_eq!(titles(dialog.visible_items()), vec!["Apple"]);
        dialog.set_query("Apple");
        assert_eq!(dialog.visible_len(), 0);
    }

    #[tokio::test]
    async fn single_mode_returns_the_highlighted_item() {
        let host = RecordingHost::default();
        let result = select_from(&host, fruit(), SelectConfig::default());
        let mut dialog = host.take_select();
        dialog.set_query("r");
        dialog.move_down();
        dialog.move_down();
        dialog.move_down();
        assert_eq!(dialog.cursor(), 1);
        assert!(dialog.confirm());
        assert!(!dialog.confirm());
        assert_eq!(
            result.await,
            SelectionResult::Single(SelectableItem::new("3", "Cherry", "red"))
        );
    }

    #[tokio::test]
    async fn single_mode_ignores_confirm_with_nothing_visible() {
        let host = RecordingHost::default();
        let result = select_from(&host, fruit(), SelectConfig::default());
        let mut dialog = host.take_select();
        dialog.set_query("none of these");
        assert!(!dialog.confirm());
        assert!(!dialog.is_settled());
        assert!(dialog.cancel());
        assert_eq!(result.await, SelectionResult::Cancelled);
    }

    #[tokio::test]
    async fn multi_mode_keeps_checks_across_filters_in_original_order() {
        let host = RecordingHost::default();
        let config = SelectConfig {
            multi_select: true,
            ..SelectConfig::default()
        };
        let result = select_from(&host, fruit(), config);
        let mut dialog = host.take_select();
        dialog.move_down();
        dialog.move_down();
        dialog.toggle();
        dialog.set_query("apple");
        dialog.toggle();
        assert!(dialog.is_checked(0));
        dialog.set_query("");
        assert!(dialog.confirm());
        assert_eq!(
            result.await,
            SelectionResult::Multiple(vec![
                SelectableItem::new("1", "Apple", "red"),
                SelectableItem::new("3", "Cherry", "red"),
            ])
        );
    }

    #[tokio::test]
    async fn multi_mode_may_confirm_an_empty_selection() {
        let host = RecordingHost::default();
        let config = SelectConfig {
            multi_select: true,
            ..SelectConfig::default()
        };
        let result = select_from(&host, fruit(), config);
        host.take_select().confirm();
        assert_eq!(result.await, SelectionResult::Multiple(Vec::new()));
    }

    #[tokio::test]
    async fn cancel_and_teardown_yield_the_sentinel() {
        let host = RecordingHost::default();
        let cancelled = select_from(&host, fruit(), SelectConfig::default());
        host.take_select().cancel();
        assert!(cancelled.await.is_cancelled());

        let dropped = select_from(&host, fruit(), SelectConfig::default());
        drop(host.take_select());
        assert!(dropped.await.is_cancelled());
    }

    #[test]
    fn defaults_come_from_the_text_bundle() {
        let host = RecordingHost::default();
        let _result = select_from(&host, Vec::new(), SelectConfig::default());
        let dialog = host.take_select();
        assert_eq!(dialog.title, "Select an item");
        assert_eq!(dialog.no_data_text, "No data found");
    }

    #[test]
    fn records_map_through_templates() {
        let records = vec![json!({"ProductID": 7, "Name": "Chai", "Category": "Beverages", "Price": 18})];
        let mapping = FieldMapping {
            id: "{ProductID}".to_string(),
            title: "{Name}".to_string(),
            description: "{Category} - ${Price}".to_string(),
        };
        let items = items_from_records(&records, &mapping);
        assert_eq!(items[0].id, "7");
        assert_eq!(items[0].title, "Chai");
        assert_eq!(items[0].description, "Beverages - $18");
        assert_eq!(items[0].raw["Name"], "Chai");
    }
}
