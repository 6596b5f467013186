use std::fs::File;
use std::io::{stdout, BufReader, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use handlebars::handlebars_helper;
use serde::Serialize;
use wgms::collection::Collection;
use wgms::layout::PacketType;
use wgms::schema::Schema;

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ColumnInfo {
    name: String,
    nan: usize,
}

#[derive(Debug, Clone, Serialize)]
struct Info {
    filename: String,
    vehicle: String,
    packet_type: String,
    records: usize,
    first: Option<String>,
    last: Option<String>,
    columns: Vec<ColumnInfo>,
}

/// Vehicle and packet type from a log file name, e.g., `SV3-1043_21.log`.
fn parse_name(fpath: &Path) -> Result<(String, PacketType)> {
    let stem = fpath
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("invalid file name {fpath:?}"))?;
    let (vehicle, tag) = stem
        .rsplit_once('_')
        .ok_or_else(|| anyhow!("expected a file name of the form <vehicle>_<TAG>.log"))?;
    let tag = u8::from_str_radix(tag, 16).with_context(|| format!("invalid packet tag {tag}"))?;
    Ok((vehicle.to_string(), PacketType::try_from(tag)?))
}

fn summarize(fpath: &Path) -> Result<Info> {
    let (vehicle, typ) = parse_name(fpath)?;
    let reader = BufReader::new(File::open(fpath).context("opening input")?);
    let mut collection = Collection::new(vehicle, typ);
    collection.load(reader).context("loading log")?;

    let times = collection.column(Schema::TIME).unwrap_or_default();
    let as_text = |v: &wgms::record::Value| match v {
        wgms::record::Value::Text(s) => Some(s.clone()),
        wgms::record::Value::Number(_) => None,
    };
    let columns = collection
        .field_names()
        .into_iter()
        .skip(1)
        .map(|name| ColumnInfo {
            name: name.to_string(),
            nan: collection
                .column(name)
                .unwrap_or_default()
                .iter()
                .filter(|v| v.as_f64().is_some_and(f64::is_nan))
                .count(),
        })
        .collect();

    Ok(Info {
        filename: fpath.to_string_lossy().to_string(),
        vehicle: collection.vehicle().to_string(),
        packet_type: typ.to_string(),
        records: collection.len(),
        first: times.first().and_then(as_text),
        last: times.last().and_then(as_text),
        columns,
    })
}

pub fn info(fpath: &Path, format: &Format) -> Result<()> {
    let info = summarize(fpath)?;

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &info).context("serializing to json")
        }
        Format::Text => {
            let data = render_text(&info).context("serializing info")?;
            stdout()
                .write_all(data.as_bytes())
                .context("writing to stdout")
        }
    }
}

fn render_text(info: &Info) -> Result<String> {
    handlebars_helper!(left_pad: |num: u64, v: Json| {
        let v = match v {
            serde_json::Value::String(s) => s.to_owned(),
            serde_json::Value::Null => String::new(),
            _ => v.to_string()
        };
        let width = usize::try_from(num).unwrap_or_default().max(v.len());
        format!("{v:>width$}")
    });
    let mut hb = handlebars::Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.register_helper("lpad", Box::new(left_pad));
    hb.register_template_string("info", TEXT_TEMPLATE)
        .context("registering template")?;

    hb.render("info", &info).context("rendering text")
}

const TEXT_TEMPLATE: &str = r"{{ filename }}
==========================================
Vehicle:  {{ vehicle }}
Type:     {{ packet_type }}
Count:    {{ records }}
First:    {{ first }}
Last:     {{ last }}
------------------------------------------
Column                 NaN
------------------------------------------
{{ #each columns }}{{ lpad 16 name }}  {{ lpad 8 nan }}
{{/each }}
";
