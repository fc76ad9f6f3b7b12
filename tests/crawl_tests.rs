//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end, reading extracted records back from the JSON
//! Lines output file.

use ladle::config::{
    Config, CrawlerConfig, DiscoveryBreadth, ExtractionConfig, FallbackPolicy, OutputConfig,
    SiteConfig, UserAgentConfig,
};
use ladle::crawler::crawl;
use ladle::extract::RecipeRecord;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at a mock server
fn create_test_config(
    base_url: &str,
    records_path: &str,
    breadth: DiscoveryBreadth,
) -> Config {
    let domain = url::Url::parse(base_url)
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    Config {
        site: SiteConfig {
            domain,
            base_url: Some(base_url.to_string()),
        },
        crawler: CrawlerConfig {
            max_concurrent_requests: 4,
            request_delay_ms: 0, // No politeness delay in tests
        },
        extraction: ExtractionConfig {
            fallback_policy: FallbackPolicy::Heuristic,
            discovery_breadth: breadth,
        },
        user_agent: UserAgentConfig {
            name: "TestBot".to_string(),
            version: "1.0".to_string(),
        },
        output: OutputConfig {
            records_path: records_path.to_string(),
        },
    }
}

fn read_records(path: &std::path::Path) -> Vec<RecipeRecord> {
    let content = std::fs::read_to_string(path).expect("Failed to read records file");
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Failed to parse record line"))
        .collect()
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

#[tokio::test]
async fn test_strict_crawl_extracts_only_detail_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Listing page links to a recipe detail page, a category listing, an
    // external site, and an unrelated internal page
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(html_response(format!(
            r#"<html><head><title>All Recipes</title></head><body>
            <a href="{base_url}/recipes/chicken-pasta">Chicken Pasta</a>
            <a href="{base_url}/recipes/category/mains">Mains</a>
            <a href="https://othersite.example/recipes/elsewhere">Elsewhere</a>
            <a href="{base_url}/about">About</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    // The detail page carries an embedded structured payload
    Mock::given(method("GET"))
        .and(path("/recipes/chicken-pasta"))
        .respond_with(html_response(
            r#"<html><head><title>Chicken Pasta</title></head><body>
            <script id="__POST_CONTENT__">{
                "ingredients": [{"ingredients": [
                    {"quantityText": "200g", "ingredientText": "penne pasta", "note": ""},
                    {"quantityText": "2", "ingredientText": "chicken breasts", "note": "diced"}
                ]}],
                "cookAndPrepTime": {"preparationMax": 600, "cookingMax": 1200, "total": 1800},
                "diet": [{"display": "High-protein"}],
                "skillLevel": "Easy",
                "methodSteps": [
                    {"content": [{"type": "html", "data": {"value": "<p>Boil the pasta.</p>"}}]},
                    {"content": [{"type": "html", "data": {"value": "<p>Fry the chicken.</p>"}}]}
                ],
                "userRatings": {"avg": 4.5, "total": 12},
                "nutritions": [{"label": "kcal", "value": 520, "unit": ""}]
            }</script>
            </body></html>"#
            .to_string(),
        ))
        .mount(&mock_server)
        .await;

    // Strict discovery must never fetch the category listing
    Mock::given(method("GET"))
        .and(path("/recipes/category/mains"))
        .respond_with(html_response("<html><body>Mains</body></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    // ...nor the unrelated internal page
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response("<html><body>About</body></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.jsonl");
    let config = create_test_config(
        &base_url,
        records_path.to_str().unwrap(),
        DiscoveryBreadth::Strict,
    );

    let stats = crawl(config).await.expect("Crawl failed");

    // Listing page + one detail page
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.records_emitted, 1);
    assert_eq!(stats.fetch_errors, 0);

    let records = read_records(&records_path);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.url, format!("{base_url}/recipes/chicken-pasta"));
    assert_eq!(record.title, "Chicken Pasta");
    assert_eq!(
        record.ingredients,
        vec!["200g penne pasta", "2 chicken breasts (diced)"]
    );
    assert_eq!(record.time.prep, Some(10));
    assert_eq!(record.time.cook, Some(20));
    assert_eq!(record.time.total, Some(30));
    assert_eq!(record.dietary_labels, vec!["High-protein"]);
    assert_eq!(record.difficulty, "Easy");
    assert_eq!(record.instructions, "Boil the pasta.\nFry the chicken.");
    assert_eq!(record.ratings, "4.5/5 (12 ratings)");
    assert_eq!(record.fitness_relevance, "kcal: 520");
}

#[tokio::test]
async fn test_permissive_crawl_follows_category_listings() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="{base_url}/recipes/category/mains">Mains</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    // The category listing is not itself a recipe, but links to one
    Mock::given(method("GET"))
        .and(path("/recipes/category/mains"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="{base_url}/recipes/beef-stew">Beef Stew</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/beef-stew"))
        .respond_with(html_response(
            r#"<html><head><title>Beef Stew</title></head><body>
            <div class="ingredients"><ul>
                <li>500g stewing beef</li>
                <li>2 large carrots</li>
            </ul></div>
            <div class="instructions"><ol>
                <li>Brown the beef in batches.</li>
                <li>Simmer for two hours.</li>
            </ol></div>
            </body></html>"#
            .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.jsonl");
    let config = create_test_config(
        &base_url,
        records_path.to_str().unwrap(),
        DiscoveryBreadth::Permissive,
    );

    let stats = crawl(config).await.expect("Crawl failed");

    // Listing, category listing, detail page
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.records_emitted, 1);

    let records = read_records(&records_path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Beef Stew");
    assert_eq!(
        records[0].ingredients,
        vec!["500g stewing beef", "2 large carrots"]
    );
    assert_eq!(
        records[0].instructions,
        "Brown the beef in batches.\nSimmer for two hours."
    );
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The same recipe is linked three times across two pages
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="{base_url}/recipes/lentil-soup">Lentil Soup</a>
            <a href="{base_url}/recipes/lentil-soup">Featured: Lentil Soup</a>
            <a href="{base_url}/recipes/flatbread">Flatbread</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/lentil-soup"))
        .respond_with(html_response(format!(
            r#"<html><head><title>Lentil Soup</title></head><body>
            <div class="ingredients"><ul><li>300g red lentils</li></ul></div>
            <a href="{base_url}/recipes/flatbread">Serve with flatbread</a>
            </body></html>"#
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/flatbread"))
        .respond_with(html_response(
            r#"<html><head><title>Flatbread</title></head><body>
            <div class="ingredients"><ul><li>250g plain flour</li></ul></div>
            </body></html>"#
            .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.jsonl");
    let config = create_test_config(
        &base_url,
        records_path.to_str().unwrap(),
        DiscoveryBreadth::Strict,
    );

    let stats = crawl(config).await.expect("Crawl failed");

    // Wiremock verifies expect(1) on drop; each record appears exactly once
    assert_eq!(stats.records_emitted, 2);
    let records = read_records(&records_path);
    let mut titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Flatbread", "Lentil Soup"]);
}

#[tokio::test]
async fn test_fetch_errors_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="{base_url}/recipes/missing-page">Missing</a>
            <a href="{base_url}/recipes/tomato-salad">Tomato Salad</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/missing-page"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/tomato-salad"))
        .respond_with(html_response(
            r#"<html><head><title>Tomato Salad</title></head><body>
            <div class="ingredients"><ul><li>4 ripe tomatoes</li></ul></div>
            </body></html>"#
            .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.jsonl");
    let config = create_test_config(
        &base_url,
        records_path.to_str().unwrap(),
        DiscoveryBreadth::Strict,
    );

    let stats = crawl(config).await.expect("Crawl failed");

    assert_eq!(stats.fetch_errors, 1);
    assert_eq!(stats.records_emitted, 1);

    let records = read_records(&records_path);
    assert_eq!(records[0].title, "Tomato Salad");
}

#[tokio::test]
async fn test_non_html_responses_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The slug passes the URL classifier, so the page is fetched and the
    // content-type check is what skips it
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(html_response(format!(
            r#"<html><body>
            <a href="{base_url}/recipes/export-data">Export</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/export-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<rss></rss>", "application/rss+xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.jsonl");
    let config = create_test_config(
        &base_url,
        records_path.to_str().unwrap(),
        DiscoveryBreadth::Strict,
    );

    let stats = crawl(config).await.expect("Crawl failed");

    // Wiremock verifies expect(1) on drop: the export page was requested.
    // Only the listing counts as a fetched page; the non-HTML response is
    // skipped without a record or an error.
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.records_emitted, 0);
    assert_eq!(stats.fetch_errors, 0);
}
