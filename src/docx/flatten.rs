// WordprocessingML Flattener
//
// Turns document.xml into plain text, one paragraph per line. The source
// markup is processed one physical line at a time:
//
//   1. `&amp;` -> `&` (no other entity is decoded)
//   2. `</w:p>` -> newline
//   3. every `<...>` tag is dropped
//   4. control (Cc) and format (Cf) characters other than newline are
//      dropped; space separators are kept
//
// Tags never span physical lines in the exported documents, so no state is
// carried from one line to the next.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{IoContext, Result};

const AMP_ENTITY: &str = "&amp;";
const PARAGRAPH_END: &str = "</w:p>";

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static NON_PRINTABLE_RE: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

fn non_printable_regex() -> &'static Regex {
    NON_PRINTABLE_RE.get_or_init(|| {
        Regex::new(r"[\p{Cc}\p{Cf}&&[^\n]]+").expect("non-printable pattern is valid")
    })
}

/// Flatten a single markup line
pub fn flatten_line(line: &str) -> String {
    let line = line.replace(AMP_ENTITY, "&");
    let line = line.replace(PARAGRAPH_END, "\n");
    let line = tag_regex().replace_all(&line, "");
    non_printable_regex().replace_all(&line, "").into_owned()
}

/// Lazily flatten every line of `reader`
pub fn flatten_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.lines().map(|line| line.map(|l| flatten_line(&l)))
}

/// Flatten `input` into `output`, returning the number of source lines read
pub fn flatten_file(input: &Path, output: &Path) -> Result<usize> {
    log::info!("Flattening {} -> {}", input.display(), output.display());

    let reader = BufReader::new(
        File::open(input).context(|| format!("Failed to open {}", input.display()))?,
    );
    let mut writer = BufWriter::new(
        File::create(output).context(|| format!("Failed to create {}", output.display()))?,
    );

    let count = flatten_into(reader, &mut writer)
        .context(|| format!("Failed to flatten {}", input.display()))?;
    writer
        .flush()
        .context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Flattened {} markup lines", count);
    Ok(count)
}

fn flatten_into<R: BufRead, W: Write>(reader: R, writer: &mut W) -> std::io::Result<usize> {
    let mut count = 0;
    for line in flatten_lines(reader) {
        writer.write_all(line?.as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}
