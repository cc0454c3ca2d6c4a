use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::io::lenient::{self, indent_level, optional_field, parse_id, parse_number, parse_percent};
use crate::io::tokenizer::{self, tokenize};
use crate::model::category::FALLBACK_CATEGORY;
use crate::model::{CategoryVocabulary, InputFormat, RowWarning, Task, TaskId};

/// Fixed-position rows with fewer fields than this are skipped.
pub const MIN_FIXED_FIELDS: usize = 10;

/// Name fragments that mark header echoes and footer rows.
pub const DEFAULT_DENYLIST: &[&str] = &["Nome da tarefa", "Task name", "Task Name", "Indicators"];

/// The semantic columns a schedule row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Complete,
    Physical,
    Replan,
    Duration,
    Start,
    Finish,
    ActualStart,
    ActualFinish,
    Predecessors,
    BaselineStart,
    BaselineFinish,
    PhysicalPlannedBaseline,
    PhysicalPlannedReplan,
    PhysicalCalculated,
}

/// Column order of the fixed-position export.
const FIXED_LAYOUT: [Column; 16] = [
    Column::Id,
    Column::Name,
    Column::Complete,
    Column::Physical,
    Column::Replan,
    Column::Duration,
    Column::Start,
    Column::Finish,
    Column::ActualStart,
    Column::ActualFinish,
    Column::Predecessors,
    Column::BaselineStart,
    Column::BaselineFinish,
    Column::PhysicalPlannedBaseline,
    Column::PhysicalPlannedReplan,
    Column::PhysicalCalculated,
];

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-', '_', '.', '%'], "")
}

/// Map a normalized header to the column it names.
fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "código" | "uniqueid" => Some(Column::Id),

        "nomedatarefa" | "taskname" | "name" | "nome" | "tarefa" => Some(Column::Name),

        "complete" | "concluída" | "concluido" | "percentcomplete" => Some(Column::Complete),

        "physicalcomplete" | "físicoconcluída" | "físicoconcluído" => Some(Column::Physical),

        "previstoreplanejamento" | "replan" | "replanned" => Some(Column::Replan),

        "duration" | "duração" => Some(Column::Duration),

        "start" | "início" | "inicio" => Some(Column::Start),

        "finish" | "término" | "termino" | "fim" => Some(Column::Finish),

        "actualstart" | "inícioreal" | "inicioreal" => Some(Column::ActualStart),

        "actualfinish" | "términoreal" | "terminoreal" => Some(Column::ActualFinish),

        "predecessors" | "predecessoras" | "predecessores" => Some(Column::Predecessors),

        "baselinestart" | "iníciodalinhadebase" | "iniciodalinhadebase" | "iníciolb" => {
            Some(Column::BaselineStart)
        }

        "baselinefinish" | "términodalinhadebase" | "terminodalinhadebase" | "términolb" => {
            Some(Column::BaselineFinish)
        }

        "físicoprevlb" | "fisicoprevlb" => Some(Column::PhysicalPlannedBaseline),

        "físicoprevreplanejado" | "fisicoprevreplanejado" => Some(Column::PhysicalPlannedReplan),

        "físicocalculado" | "fisicocalculado" => Some(Column::PhysicalCalculated),

        _ => None,
    }
}

/// Header that marks the named-column export.
const NAMED_FORM_MARKER: &str = "nomedatarefa";

/// Named-column form when the first line carries the `Nome da tarefa` header.
///
/// The fixed-position export carries an English header row, which is skipped
/// rather than used for addressing; force [`InputFormat::Named`] to address
/// such a file by its headers instead.
pub fn detect_format(first_line: &str, delimiter: char) -> InputFormat {
    let has_marker = tokenize(first_line, delimiter)
        .iter()
        .any(|h| normalize_header(h) == NAMED_FORM_MARKER);
    if has_marker {
        InputFormat::Named
    } else {
        InputFormat::Fixed
    }
}

// ── Raw record ───────────────────────────────────────────────────────────────

/// One row's fields, addressed by meaning rather than position.
#[derive(Debug, Default)]
pub struct RawRecord<'a> {
    fields: [&'a str; 16],
}

impl<'a> RawRecord<'a> {
    fn get(&self, col: Column) -> &'a str {
        self.fields[col as usize]
    }

    fn set(&mut self, col: Column, value: &'a str) {
        self.fields[col as usize] = value;
    }

    /// Extraction by fixed position.
    pub fn from_positions(fields: &'a [String]) -> Self {
        let mut record = RawRecord::default();
        for (col, value) in FIXED_LAYOUT.iter().zip(fields) {
            record.set(*col, value);
        }
        record
    }

    /// Extraction through a header-derived column map.
    pub fn from_columns(col_map: &[Option<Column>], fields: impl Iterator<Item = &'a str>) -> Self {
        let mut record = RawRecord::default();
        for (col, value) in col_map.iter().zip(fields) {
            if let Some(col) = col {
                record.set(*col, value);
            }
        }
        record
    }
}

// ── Task record builder ──────────────────────────────────────────────────────

/// Turns raw records into tasks, deriving outline level and category.
pub struct TaskRecordBuilder<'v> {
    vocabulary: &'v CategoryVocabulary,
    denylist: Vec<String>,
    /// Open ancestors as (level, trimmed name), nearest last.
    ancestors: Vec<(u32, String)>,
    warnings: Vec<RowWarning>,
    /// Positions (in build order) of tasks whose id came from the row index.
    fallback_ids: Vec<usize>,
    built: usize,
}

impl<'v> TaskRecordBuilder<'v> {
    pub fn new(vocabulary: &'v CategoryVocabulary) -> Self {
        Self {
            vocabulary,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            ancestors: Vec::new(),
            warnings: Vec::new(),
            fallback_ids: Vec::new(),
            built: 0,
        }
    }

    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    /// Build the task for one row, or `None` when the row is a header echo,
    /// footer or nameless.
    ///
    /// `row_index` is the 0-based line index, used as the id when the id cell
    /// is unusable. `line` is the 1-based line number used in warnings.
    pub fn build(&mut self, record: &RawRecord<'_>, row_index: usize, line: usize) -> Option<Task> {
        let raw_name = record.get(Column::Name);
        let name = raw_name.trim();
        if name.is_empty() {
            debug!(line, "Skipping row without a task name");
            return None;
        }
        if let Some(marker) = self.denylist.iter().find(|m| name.contains(m.as_str())) {
            debug!(line, marker = %marker, "Skipping header/footer row");
            return None;
        }

        let raw_id = record.get(Column::Id);
        let id = parse_id(raw_id, row_index as i64);
        if id.defaulted && !raw_id.trim().is_empty() {
            self.warn(line, "id", raw_id);
        }

        let mut task = Task::new(id.value, name);
        task.completion_percent = self.percent(record, Column::Complete, "completion", line);
        task.physical_percent = self.percent(record, Column::Physical, "physical", line);
        task.replan_percent = self.percent(record, Column::Replan, "replan", line);
        task.physical_planned_baseline =
            self.number(record, Column::PhysicalPlannedBaseline, "physical_planned_baseline", line);
        task.physical_planned_replan =
            self.number(record, Column::PhysicalPlannedReplan, "physical_planned_replan", line);
        task.physical_calculated =
            self.number(record, Column::PhysicalCalculated, "physical_calculated", line);

        task.duration = record.get(Column::Duration).trim().to_string();
        task.start = record.get(Column::Start).trim().to_string();
        task.finish = record.get(Column::Finish).trim().to_string();
        task.actual_start = optional_field(record.get(Column::ActualStart));
        task.actual_finish = optional_field(record.get(Column::ActualFinish));
        task.predecessors = record.get(Column::Predecessors).trim().to_string();
        task.baseline_start = record.get(Column::BaselineStart).trim().to_string();
        task.baseline_finish = record.get(Column::BaselineFinish).trim().to_string();

        if !task.finish.is_empty() && lenient::parse_date(&task.finish).is_none() {
            self.warn(line, "finish", &task.finish);
        }
        if !task.baseline_finish.is_empty() && lenient::parse_date(&task.baseline_finish).is_none() {
            self.warn(line, "baseline_finish", &task.baseline_finish);
        }

        task.level = indent_level(raw_name);
        task.category = self.resolve_category(name, task.level);

        if id.defaulted {
            self.fallback_ids.push(self.built);
        }
        self.built += 1;
        Some(task)
    }

    /// Own keyword match first, then the nearest ancestors', then the fallback.
    fn resolve_category(&mut self, name: &str, level: u32) -> String {
        while self.ancestors.last().is_some_and(|(l, _)| *l >= level) {
            self.ancestors.pop();
        }

        let label = self
            .vocabulary
            .match_name(name)
            .or_else(|| {
                self.ancestors
                    .iter()
                    .rev()
                    .find_map(|(_, ancestor)| self.vocabulary.match_name(ancestor))
            })
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string();

        self.ancestors.push((level, name.to_string()));
        label
    }

    fn percent(&mut self, record: &RawRecord<'_>, col: Column, field: &str, line: usize) -> f64 {
        let raw = record.get(col);
        let parsed = parse_percent(raw);
        if parsed.defaulted && !raw.trim().is_empty() {
            self.warn(line, field, raw);
        }
        parsed.value
    }

    fn number(&mut self, record: &RawRecord<'_>, col: Column, field: &str, line: usize) -> f64 {
        let raw = record.get(col);
        let parsed = parse_number(raw);
        if parsed.defaulted && !raw.trim().is_empty() {
            self.warn(line, field, raw);
        }
        parsed.value
    }

    fn warn(&mut self, line: usize, field: &str, raw: &str) {
        debug!(line, field, raw, "Unparsable value replaced by default");
        self.warnings.push(RowWarning {
            row: line,
            field: field.to_string(),
            raw: raw.to_string(),
        });
    }

    /// Give every fallback id that clashes with another task's id the next
    /// free id, so ids are unique across the import. Explicit ids win.
    ///
    /// `tasks` must be exactly the tasks this builder returned, in order.
    pub fn settle_fallback_ids(&self, tasks: &mut [Task]) {
        if self.fallback_ids.is_empty() {
            return;
        }
        let mut used: HashSet<TaskId> = tasks
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.fallback_ids.contains(i))
            .map(|(_, t)| t.id)
            .collect();
        let mut next = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;

        for &i in &self.fallback_ids {
            let Some(task) = tasks.get_mut(i) else { continue };
            if !used.insert(task.id) {
                debug!(from = task.id, to = next, "Fallback id already taken; renumbering");
                task.id = next;
                used.insert(next);
                next += 1;
            }
        }
    }

    pub fn into_warnings(self) -> Vec<RowWarning> {
        self.warnings
    }
}

// ── Import ───────────────────────────────────────────────────────────────────

/// How to read the source text. `None` fields are auto-detected.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub format: Option<InputFormat>,
    pub delimiter: Option<char>,
    pub vocabulary: CategoryVocabulary,
    pub denylist: Option<Vec<String>>,
}

/// Flat tasks extracted from one source text, in source order.
#[derive(Debug, Clone)]
pub struct ImportedRows {
    pub format: InputFormat,
    pub tasks: Vec<Task>,
    pub data_rows: usize,
    pub skipped: usize,
    pub warnings: Vec<RowWarning>,
}

/// Extract the flat task list from schedule text.
///
/// Fails with `EmptyInput` when there are no data rows at all and with
/// `NoUsableRows` when every data row was rejected.
pub fn import_text(text: &str, options: &ImportOptions) -> Result<ImportedRows> {
    let Some((_, first_line)) = tokenizer::lines(text).next() else {
        return Err(Error::EmptyInput);
    };
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| tokenizer::detect_delimiter(first_line));
    let format = options
        .format
        .unwrap_or_else(|| detect_format(first_line, delimiter));

    let mut builder = TaskRecordBuilder::new(&options.vocabulary);
    if let Some(denylist) = &options.denylist {
        builder = builder.with_denylist(denylist.clone());
    }

    let (mut tasks, data_rows) = match format {
        InputFormat::Named => read_named(text, delimiter, &mut builder)?,
        InputFormat::Fixed => read_fixed(text, delimiter, &mut builder),
    };
    builder.settle_fallback_ids(&mut tasks);

    let skipped = data_rows - tasks.len();
    if data_rows == 0 {
        return Err(Error::EmptyInput);
    }
    if tasks.is_empty() {
        return Err(Error::NoUsableRows { skipped });
    }

    info!(
        ?format,
        tasks = tasks.len(),
        skipped,
        "Extracted schedule rows"
    );

    Ok(ImportedRows {
        format,
        tasks,
        data_rows,
        skipped,
        warnings: builder.into_warnings(),
    })
}

fn read_named(
    text: &str,
    delimiter: char,
    builder: &mut TaskRecordBuilder<'_>,
) -> Result<(Vec<Task>, usize)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = u8::try_from(u32::from(delimiter)).unwrap_or(b',');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.contains(&Some(Column::Name)) {
        return Err(Error::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut tasks = Vec::new();
    let mut data_rows = 0usize;

    for (i, result) in reader.records().enumerate() {
        data_rows += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(row = i + 2, error = %e, "Skipping unreadable CSV row");
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 2);

        let raw = RawRecord::from_columns(&col_map, record.iter());
        if let Some(task) = builder.build(&raw, line - 1, line) {
            tasks.push(task);
        }
    }

    Ok((tasks, data_rows))
}

fn read_fixed(text: &str, delimiter: char, builder: &mut TaskRecordBuilder<'_>) -> (Vec<Task>, usize) {
    let mut tasks = Vec::new();
    let mut data_rows = 0usize;

    for (n, (line, content)) in tokenizer::lines(text).enumerate() {
        let fields = tokenize(content, delimiter);

        // A leading row whose id cell is not numeric is the column header.
        if n == 0 && parse_id(fields.first().map(String::as_str).unwrap_or(""), 0).defaulted {
            debug!(line, "Treating first row as header");
            continue;
        }

        data_rows += 1;
        if fields.len() < MIN_FIXED_FIELDS {
            debug!(line, fields = fields.len(), "Skipping short row");
            continue;
        }

        let raw = RawRecord::from_positions(&fields);
        if let Some(task) = builder.build(&raw, line - 1, line) {
            tasks.push(task);
        }
    }

    (tasks, data_rows)
}
