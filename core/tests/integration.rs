//! Lookup flows against the live mock provider.
//!
//! # Design
//! Starts `mock-fdc` on a random port, then drives every core client
//! operation over real HTTP using ureq. Validates that request building,
//! response parsing and extraction work end-to-end with an actual server.

use nutrition_core::{extract_nutrition, FdcClient, FdcError, HttpMethod, HttpRequest, HttpResponse};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(req.timeout)
        .build()
        .new_agent();

    let mut builder = match req.method {
        HttpMethod::Get => agent.get(&req.url),
    };
    for (key, value) in &req.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_mock_fdc() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_fdc::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn barcode_and_label_flows() {
    let base_url = start_mock_fdc();
    let client = FdcClient::new(&base_url, "integration-key");

    // Step 1: barcode search returns the branded hit.
    let candidates = client
        .parse_search(execute(client.build_barcode_search(mock_fdc::PEANUT_BUTTER_UPC)))
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].is_branded());

    // Step 2: fetch and extract its detail record.
    let record = client
        .parse_food_details(execute(client.build_food_details(candidates[0].fdc_id.unwrap())))
        .unwrap();
    let info = extract_nutrition(record.as_ref()).unwrap();
    assert_eq!(info.calories_kcal, 588.0);
    assert_eq!(info.protein_g, 25.0);
    assert_eq!(info.fat_g, 50.0);
    assert_eq!(info.carbs_g, 20.0);
    assert_eq!(info.serving_size_g, 32.0);
    assert_eq!(info.allergens, "2 Tbsp");

    // Step 3: label search reaches SR Legacy foods and caps at one hit.
    let candidates = client
        .parse_search(execute(client.build_label_search("apple")))
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].data_type.as_deref(), Some("SR Legacy"));

    let record = client
        .parse_food_details(execute(client.build_food_details(candidates[0].fdc_id.unwrap())))
        .unwrap();
    let info = extract_nutrition(record.as_ref()).unwrap();
    assert_eq!(info.calories_kcal, 52.0);
    assert_eq!(info.serving_size_g, 100.0);
    assert_eq!(info.allergens, "None specified");

    // Step 4: a record without nutrients extracts to nothing.
    let record = client
        .parse_food_details(execute(client.build_food_details(2004)))
        .unwrap();
    assert!(extract_nutrition(record.as_ref()).is_none());

    // Step 5: unknown id surfaces the provider status.
    let err = client
        .parse_food_details(execute(client.build_food_details(1)))
        .unwrap_err();
    assert!(matches!(err, FdcError::HttpError { status: 404, .. }));

    // Step 6: no hits is an empty list, not an error.
    let candidates = client
        .parse_search(execute(client.build_label_search("quinoa")))
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn missing_api_key_is_rejected_by_provider() {
    let base_url = start_mock_fdc();
    let client = FdcClient::new(&base_url, "");

    let err = client
        .parse_search(execute(client.build_barcode_search(mock_fdc::PEANUT_BUTTER_UPC)))
        .unwrap_err();
    assert!(matches!(err, FdcError::HttpError { status: 403, .. }));
}
