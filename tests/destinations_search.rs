mod common;

use axum_travel_api::{dto::destinations::DestinationQuery, services::destination_service};

#[tokio::test]
async fn filters_compose_with_and_and_results_are_ordered() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    common::create_destination(&state, "Pokhara", "Gandaki", "Lakes", "Lakeside city").await?;
    common::create_destination(&state, "Rara Lake", "Karnali", "Lakes", "Remote alpine lake")
        .await?;
    common::create_destination(&state, "Lumbini", "Lumbini", "Heritage", "Birthplace of Buddha")
        .await?;

    // Single filter, case-insensitive substring.
    let by_region = destination_service::list_destinations(
        &state,
        DestinationQuery {
            region: Some("gand".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(by_region.items.len(), 1);
    assert_eq!(by_region.items[0].name, "Pokhara");

    // q matches name OR description OR region.
    let by_q = destination_service::list_destinations(
        &state,
        DestinationQuery {
            q: Some("lake".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(by_q.items.len(), 2);

    // AND composition narrows; the same predicates give the same set
    // regardless of which parameter carries which term.
    let narrowed = destination_service::list_destinations(
        &state,
        DestinationQuery {
            region: Some("karnali".into()),
            category: Some("lakes".into()),
            q: Some("lake".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(narrowed.items.len(), 1);
    assert_eq!(narrowed.items[0].name, "Rara Lake");

    // No filters: everything, ordered by region then name.
    let all = destination_service::list_destinations(&state, DestinationQuery::default())
        .await?
        .data
        .unwrap();
    let names: Vec<&str> = all.items.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Pokhara", "Rara Lake", "Lumbini"]);

    // Unmatched filters return an empty set, not an error.
    let none = destination_service::list_destinations(
        &state,
        DestinationQuery {
            category: Some("beaches".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert!(none.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn featured_returns_at_most_six() -> anyhow::Result<()> {
    let Some((state, _db)) = common::setup_state().await? else {
        return Ok(());
    };

    for i in 0..8 {
        common::create_destination(
            &state,
            &format!("Spot {i}"),
            "Bagmati",
            "Heritage",
            "A place",
        )
        .await?;
    }

    let featured = destination_service::featured(&state).await?.data.unwrap();
    assert_eq!(featured.items.len(), 6);

    Ok(())
}
