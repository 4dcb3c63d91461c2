use harvester::{
    build_client, scrape_page, start_process, Config, Domain, EmailSet, Harvester, HarvestError,
};
use reqwest::Url;
use httpmock::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn results_page(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!(
        r#"<html><body>
        <div class="result">
          <h2><a class="result__a" href="//duckduckgo.com/l/?uddg={encoded}&amp;rut=1">Team</a></h2>
          <a class="result__snippet">Ask <b>jsmith@example.com</b> anything</a>
        </div>
        </body></html>"#
    )
}

fn test_config(server: &MockServer, target: &str, dir: &Path) -> Config {
    let mut config = Config::new(target);
    config.output_dir = dir.to_path_buf();
    config.engine = server.url("/html/");
    config.delay_ms = 0;
    config.timeout = 5;
    config.direct_scrape = false;
    config
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

//-------------------------whole pipeline against a mock engine----------------------

#[tokio::test]
async fn harvests_snippets_and_result_pages() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(results_page(&server.url("/team")));
    });
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/team");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<p>contact John.Smith@Example.com or someone@elsewhere.org</p>");
    });

    let dir = TempDir::new().unwrap();
    let written = start_process(test_config(&server, "example.com", dir.path()))
        .await
        .unwrap();

    // every query hits the engine, the shared result page is fetched once
    search_mock.assert_hits(4);
    page_mock.assert_hits(1);
    assert_eq!(written.len(), 1);
    assert_eq!(
        fs::read_to_string(&written[0]).unwrap(),
        "john.smith@example.com\njsmith@example.com\n"
    );
    let names = files_in(dir.path());
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("example.com_"));
}

#[tokio::test]
async fn sends_site_scoped_queries() {
    let server = MockServer::start();
    let quoted_query = server.mock(|when, then| {
        when.method(GET)
            .path("/html/")
            .query_param("q", "\"@example.com\"");
        then.status(200).body("<html></html>");
    });
    let intext_query = server.mock(|when, then| {
        when.method(GET)
            .path("/html/")
            .query_param("q", "intext:\"@example.com\"");
        then.status(200).body("<html></html>");
    });

    let dir = TempDir::new().unwrap();
    // the two unmatched queries get a 404, which only costs those queries
    let written = start_process(test_config(&server, "example.com", dir.path()))
        .await
        .unwrap();

    quoted_query.assert_hits(1);
    intext_query.assert_hits(1);
    // nothing found, nothing written
    assert!(written.is_empty());
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn one_file_per_productive_domain() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(200).body(results_page(&server.url("/gone")));
    });
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });

    let dir = TempDir::new().unwrap();
    let list = dir.path().join("domains.txt");
    fs::write(&list, "example.com\nexample.org\n").unwrap();
    let out = dir.path().join("out");

    let written = start_process(test_config(&server, list.to_str().unwrap(), &out))
        .await
        .unwrap();

    assert_eq!(written.len(), 1);
    let names = files_in(&out);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("example.com_"));
    assert_eq!(
        fs::read_to_string(&written[0]).unwrap(),
        "jsmith@example.com\n"
    );
}

#[tokio::test]
async fn failing_engine_skips_domain() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(503);
    });

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, "example.com", dir.path());
    let harvester = Harvester::new(&config).unwrap();
    let result = harvester.harvest(&Domain::parse("example.com").unwrap()).await;
    assert!(matches!(result, Err(HarvestError::SearchUnavailable(_))));

    // the run itself carries on and writes nothing
    let written = start_process(config).await.unwrap();
    assert!(written.is_empty());
    assert!(files_in(dir.path()).is_empty());
    search_mock.assert_hits(8);
}

#[tokio::test]
async fn bad_output_dir_stops_before_searching() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(200).body(results_page(&server.url("/team")));
    });

    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("plain-file");
    fs::write(&not_a_dir, "").unwrap();

    let result = start_process(test_config(&server, "example.com", &not_a_dir)).await;
    assert!(matches!(result, Err(HarvestError::OutputDir { .. })));
    search_mock.assert_hits(0);
    assert_eq!(files_in(dir.path()), ["plain-file"]);
}

//-------------------------direct scrape of the site's own pages----------------------

fn site_harvester(engine: &MockServer, bases: [&MockServer; 2], dir: &Path) -> Harvester {
    let mut config = test_config(engine, "example.com", dir);
    config.direct_scrape = true;
    Harvester::new(&config).unwrap().site_bases(
        bases
            .iter()
            .map(|server| Url::parse(&server.url("/")).unwrap())
            .collect(),
    )
}

fn example() -> Domain {
    Domain::parse("example.com").unwrap()
}

#[tokio::test]
async fn falls_back_when_first_base_gives_nothing() {
    let primary = MockServer::start();
    let fallback = MockServer::start();
    primary.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(200).body("<html></html>");
    });
    let primary_contact = primary.mock(|when, then| {
        when.method(GET).path("/contact");
        then.status(404);
    });
    let fallback_contact = fallback.mock(|when, then| {
        when.method(GET).path("/contact");
        then.status(200).body("<p>write to Info@Example.com</p>");
    });

    let dir = TempDir::new().unwrap();
    let harvester = site_harvester(&primary, [&primary, &fallback], dir.path());
    let found = harvester.harvest(&example()).await.unwrap();

    primary_contact.assert_hits(1);
    fallback_contact.assert_hits(1);
    assert_eq!(found, EmailSet::from(["info@example.com".to_string()]));
}

#[tokio::test]
async fn stops_at_first_productive_base() {
    let primary = MockServer::start();
    let fallback = MockServer::start();
    primary.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(200).body("<html></html>");
    });
    let primary_about = primary.mock(|when, then| {
        when.method(GET).path("/about");
        then.status(200).body("<p>team@example.com</p>");
    });
    let fallback_about = fallback.mock(|when, then| {
        when.method(GET).path("/about");
        then.status(200).body("<p>other@example.com</p>");
    });
    // the primary has no careers page, so the fallback is asked
    let fallback_careers = fallback.mock(|when, then| {
        when.method(GET).path("/careers");
        then.status(404);
    });

    let dir = TempDir::new().unwrap();
    let harvester = site_harvester(&primary, [&primary, &fallback], dir.path());
    let found = harvester.harvest(&example()).await.unwrap();

    primary_about.assert_hits(1);
    fallback_about.assert_hits(0);
    fallback_careers.assert_hits(1);
    assert_eq!(found, EmailSet::from(["team@example.com".to_string()]));
}

#[tokio::test]
async fn site_addresses_survive_failing_engine() {
    let primary = MockServer::start();
    let fallback = MockServer::start();
    let search_mock = primary.mock(|when, then| {
        when.method(GET).path("/html/");
        then.status(503);
    });
    primary.mock(|when, then| {
        when.method(GET).path("/contact");
        then.status(200).body("<p>sales@example.com</p>");
    });

    let dir = TempDir::new().unwrap();
    let harvester = site_harvester(&primary, [&primary, &fallback], dir.path());
    let found = harvester.harvest(&example()).await.unwrap();

    search_mock.assert_hits(4);
    assert_eq!(found, EmailSet::from(["sales@example.com".to_string()]));
}

//-------------------------single page scraping----------------------

#[tokio::test]
async fn scrapes_page_for_domain() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/contact");
        then.status(200).body(
            r#"<p>sales&#64;example.com</p><a href="mailto:Help@Example.com">help</a> x@other.net"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("support@example.com");
    });

    let client = build_client(5).unwrap();
    let domain = Domain::parse("example.com").unwrap();

    let url = Url::parse(&server.url("/contact")).unwrap();
    let found: Vec<String> = scrape_page(&client, url, &domain).await.into_iter().collect();
    assert_eq!(found, ["help@example.com", "sales@example.com"]);

    // error pages are not mined
    let url = Url::parse(&server.url("/missing")).unwrap();
    assert!(scrape_page(&client, url, &domain).await.is_empty());
}
