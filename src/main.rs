use std::thread;

use anyhow::{Result, anyhow, bail};
use clap::Parser;

use rowmill::executor::operators::{
    AggregateKind, SortDirection, create_aggregate, create_distinct, create_limit,
    create_mem_scan, create_sort,
};
use rowmill::{
    Expression, FieldValue, Operator, Projection, ProjectionColumn, Qualifier, QueryDescriptor,
    Record, output_channel, run,
};

/// Run an operator-tree query over the bundled movie collection.
#[derive(Parser)]
#[command(name = "rowmill", version, about)]
struct Args {
    /// Equality filter FIELD=VALUE; repeat to AND several together
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    filters: Vec<String>,

    /// Comma-separated output columns, each NAME or NAME:ALIAS
    #[arg(long, value_name = "COLS")]
    select: Option<String>,

    /// Sort by this field
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Suppress repeats of this field
    #[arg(long, value_name = "FIELD")]
    distinct: Option<String>,

    /// Keep only the first N tuples
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Emit one tuple summing this field
    #[arg(long, value_name = "FIELD", conflicts_with_all = ["count", "sort", "distinct"])]
    sum: Option<String>,

    /// Emit one tuple counting rows over this field
    #[arg(long, value_name = "FIELD", conflicts_with_all = ["sort", "distinct"])]
    count: Option<String>,
}

struct Movie {
    id: i64,
    name: &'static str,
    genre: &'static str,
    avg_rating: i64,
    avg_rating_f: f64,
}

impl Record for Movie {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("id".to_string(), FieldValue::Integer(self.id)),
            ("name".to_string(), FieldValue::from(self.name)),
            ("genre".to_string(), FieldValue::from(self.genre)),
            ("avg_rating".to_string(), FieldValue::Integer(self.avg_rating)),
            ("avg_rating_f".to_string(), FieldValue::Float(self.avg_rating_f)),
        ]
    }
}

fn movies() -> Vec<Movie> {
    vec![
        Movie { id: 1, name: "Cool Hand Luke", genre: "western", avg_rating: 4, avg_rating_f: 4.25 },
        Movie { id: 2, name: "Peter Pan", genre: "animated", avg_rating: 2, avg_rating_f: 1.75 },
        Movie { id: 3, name: "Lord of the Rings", genre: "sci-fi", avg_rating: 5, avg_rating_f: 4.5 },
        Movie { id: 4, name: "Star Wars", genre: "sci-fi", avg_rating: 4, avg_rating_f: 4.25 },
        Movie { id: 5, name: "Good Will Hunting", genre: "drama", avg_rating: 4, avg_rating_f: 3.75 },
        Movie { id: 6, name: "Alien", genre: "sci-fi", avg_rating: 3, avg_rating_f: 3.0 },
    ]
}

/// Parse a literal the way it would appear on the command line: integer,
/// then float, then bare text.
fn parse_literal(raw: &str) -> FieldValue {
    if let Ok(i) = raw.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return FieldValue::Float(f);
    }
    FieldValue::from(raw)
}

fn parse_filters(filters: &[String]) -> Result<Option<Expression>> {
    let mut expr: Option<Expression> = None;
    for filter in filters {
        let Some((field, value)) = filter.split_once('=') else {
            bail!("invalid filter '{}', expected FIELD=VALUE", filter);
        };
        let qual = Expression::qualifier(Qualifier::eq(field, parse_literal(value)));
        expr = Some(match expr {
            Some(prev) => Expression::and(prev, qual),
            None => qual,
        });
    }
    Ok(expr)
}

fn parse_select(select: &str) -> Projection {
    let columns = select
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|column| match column.split_once(':') {
            Some((name, alias)) => ProjectionColumn::aliased(name, alias),
            None => ProjectionColumn::new(column),
        })
        .collect();
    Projection::new(columns)
}

fn build_plan(args: &Args) -> Result<Box<dyn Operator>> {
    let predicate = parse_filters(&args.filters)?;
    let selected = args.select.as_deref().map(parse_select);
    let aggregate = match (&args.sum, &args.count) {
        (Some(field), None) => Some((AggregateKind::Sum, field.clone())),
        (None, Some(field)) => Some((AggregateKind::Count, field.clone())),
        _ => None,
    };

    // With an aggregate, the selection applies to the summary tuple (for
    // aliasing), not to the scanned rows.
    let scan_projection = match (&aggregate, &selected) {
        (None, Some(projection)) => projection.clone(),
        _ => Projection::identity(),
    };

    let mut node = create_mem_scan(movies(), predicate, scan_projection);

    if let Some(field) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        node = create_sort(node, field.clone(), direction);
    }

    if let Some(field) = &args.distinct {
        node = create_distinct(node, field.clone());
    }

    if let Some((kind, field)) = aggregate {
        let projection = match &selected {
            Some(projection) => projection.clone(),
            None => Projection::identity(),
        };
        node = create_aggregate(node, kind, field, projection);
    }

    if let Some(limit) = args.limit {
        node = create_limit(node, limit);
    }

    Ok(node)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let root = build_plan(&args)?;

    let (dest, results) = output_channel();
    let driver = thread::spawn(move || {
        run(QueryDescriptor {
            root: Some(root),
            dest,
        })
    });

    let mut rows = 0usize;
    for tuple in results {
        println!("{}", tuple);
        rows += 1;
    }

    driver
        .join()
        .map_err(|_| anyhow!("query driver panicked"))??;
    eprintln!("{} tuple(s)", rows);

    Ok(())
}
