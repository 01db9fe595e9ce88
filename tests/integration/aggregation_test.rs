use std::thread;

use anyhow::{Result, anyhow};

use rowmill::executor::operators::{AggregateKind, create_aggregate, create_mem_scan};
use rowmill::{
    Expression, FieldValue, Operator, Projection, ProjectionColumn, Qualifier, QueryDescriptor,
    Record, Tuple, output_channel, run,
};

struct Movie {
    id: i64,
    genre: &'static str,
    avg_rating: i64,
    avg_rating_f: f64,
}

impl Record for Movie {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("ID".to_string(), FieldValue::Integer(self.id)),
            ("Genre".to_string(), FieldValue::from(self.genre)),
            ("AvgRating".to_string(), FieldValue::Integer(self.avg_rating)),
            ("AvgRatingF".to_string(), FieldValue::Float(self.avg_rating_f)),
        ]
    }
}

fn movies() -> Vec<Movie> {
    vec![
        Movie { id: 1, genre: "western", avg_rating: 4, avg_rating_f: 4.25 },
        Movie { id: 2, genre: "animated", avg_rating: 2, avg_rating_f: 1.75 },
        Movie { id: 3, genre: "sci-fi", avg_rating: 5, avg_rating_f: 4.5 },
        Movie { id: 4, genre: "sci-fi", avg_rating: 4, avg_rating_f: 4.25 },
        Movie { id: 5, genre: "drama", avg_rating: 4, avg_rating_f: 3.75 },
        Movie { id: 6, genre: "sci-fi", avg_rating: 3, avg_rating_f: 3.0 },
    ]
}

fn run_query(root: Box<dyn Operator>) -> Result<Vec<Tuple>> {
    let (dest, results) = output_channel();
    let driver = thread::spawn(move || run(QueryDescriptor { root: Some(root), dest }));

    let tuples: Vec<Tuple> = results.iter().collect();
    driver
        .join()
        .map_err(|_| anyhow!("query driver panicked"))??;
    Ok(tuples)
}

// SELECT sum(avg_rating) FROM movies
#[test]
fn test_integer_sum() -> Result<()> {
    let scan = create_mem_scan(movies(), None, Projection::of(["avg_rating"]));
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Sum,
        "avg_rating",
        Projection::identity(),
    ))?;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].get("sum(avg_rating)"),
        Some(&FieldValue::Integer(22))
    );
    Ok(())
}

// SELECT sum(avg_rating_f) FROM movies
#[test]
fn test_float_sum() -> Result<()> {
    let scan = create_mem_scan(movies(), None, Projection::of(["avg_rating_f"]));
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Sum,
        "avg_rating_f",
        Projection::identity(),
    ))?;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].get("sum(avg_rating_f)"),
        Some(&FieldValue::Float(21.5))
    );
    Ok(())
}

// SELECT sum(avg_rating) AS total FROM movies
#[test]
fn test_sum_with_alias() -> Result<()> {
    let scan = create_mem_scan(movies(), None, Projection::of(["avg_rating"]));
    let projection = Projection::new(vec![ProjectionColumn::aliased("sum(avg_rating)", "total")]);
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Sum,
        "avg_rating",
        projection,
    ))?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].get("total"), Some(&FieldValue::Integer(22)));
    assert_eq!(results[0].get("sum(avg_rating)"), None);
    Ok(())
}

// SELECT count(id) FROM movies
#[test]
fn test_count() -> Result<()> {
    let scan = create_mem_scan(movies(), None, Projection::identity());
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Count,
        "id",
        Projection::identity(),
    ))?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].get("count(id)"), Some(&FieldValue::Integer(6)));
    Ok(())
}

// SELECT count(id) FROM movies WHERE genre = "sci-fi"
#[test]
fn test_count_with_filter() -> Result<()> {
    let predicate = Expression::qualifier(Qualifier::eq("genre", "sci-fi"));
    let scan = create_mem_scan(movies(), Some(predicate), Projection::identity());
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Count,
        "id",
        Projection::identity(),
    ))?;

    assert_eq!(results[0].get("count(id)"), Some(&FieldValue::Integer(3)));
    Ok(())
}

// SELECT count(id) FROM movies WHERE genre = "sci-fi" OR genre = "western"
#[test]
fn test_count_with_or_filter() -> Result<()> {
    let predicate = Expression::or(
        Expression::qualifier(Qualifier::eq("genre", "sci-fi")),
        Expression::qualifier(Qualifier::eq("genre", "western")),
    );
    let scan = create_mem_scan(movies(), Some(predicate), Projection::identity());
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Count,
        "id",
        Projection::identity(),
    ))?;

    assert_eq!(results[0].get("count(id)"), Some(&FieldValue::Integer(4)));
    Ok(())
}

// Count over an input the filter rejects entirely still emits one tuple.
#[test]
fn test_count_of_empty_stream_is_zero() -> Result<()> {
    let predicate = Expression::qualifier(Qualifier::eq("genre", "noir"));
    let scan = create_mem_scan(movies(), Some(predicate), Projection::identity());
    let results = run_query(create_aggregate(
        scan,
        AggregateKind::Count,
        "id",
        Projection::identity(),
    ))?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].get("count(id)"), Some(&FieldValue::Integer(0)));
    Ok(())
}
