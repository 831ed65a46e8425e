use consulta_proxy::core::{CachePolicy, ResponseBody};
use consulta_proxy::{Endpoint, ProxyService, QueryParams, UpstreamSettings};
use httpmock::prelude::*;

fn service_for(server: &MockServer) -> ProxyService {
    let settings = UpstreamSettings {
        postal_endpoint: server.url("/ws"),
        ..UpstreamSettings::default()
    };
    ProxyService::new(&settings)
}

fn json_body(body: ResponseBody) -> serde_json::Value {
    match body {
        ResponseBody::Json(value) => value,
        ResponseBody::Xml(text) => panic!("expected JSON body, got XML: {}", text),
    }
}

#[tokio::test]
async fn test_postal_lookup_maps_fields() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "complemento": "de 612 a 1510 - lado par",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP",
                "ibge": "3550308",
                "gia": "1004",
                "ddd": "11",
                "siafi": "7107"
            }));
    });

    let service = service_for(&server);
    let response = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "01310-100"))
        .await;

    api_mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(response.cache, Some(CachePolicy::Day));

    let body = json_body(response.body);
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 6);
    assert_eq!(
        body,
        serde_json::json!({
            "street": "Avenida Paulista",
            "neighborhood": "Bela Vista",
            "city": "São Paulo",
            "state": "SP",
            "cep": "01310-100",
            "ddd": "11"
        })
    );
}

#[tokio::test]
async fn test_masked_and_plain_cep_hit_same_upstream() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200)
            .json_body(serde_json::json!({"cep": "01310-100", "uf": "SP"}));
    });

    let service = service_for(&server);
    let masked = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "01310-100"))
        .await;
    let plain = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "01310100"))
        .await;

    api_mock.assert_hits(2);
    assert_eq!(masked, plain);
}

#[tokio::test]
async fn test_invalid_cep_never_calls_upstream() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(serde_json::json!({}));
    });

    let service = service_for(&server);
    for cep in ["", "1234567", "123456789", "abcdefgh", "0131-010"] {
        let response = service
            .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", cep))
            .await;

        assert_eq!(response.status, 400, "cep {:?}", cep);
        assert!(response.cache.is_none());
        assert_eq!(
            json_body(response.body),
            serde_json::json!({"message": "CEP inválido fornecido."})
        );
    }

    let missing = service.dispatch(Endpoint::Postal, &QueryParams::new()).await;
    assert_eq!(missing.status, 400);

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_erro_flag_is_404() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/99999999/json/");
        then.status(200).json_body(serde_json::json!({"erro": true}));
    });

    let service = service_for(&server);
    let response = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "99999999"))
        .await;

    api_mock.assert();
    assert_eq!(response.status, 404);
    assert_eq!(
        json_body(response.body),
        serde_json::json!({"message": "CEP não encontrado."})
    );
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_status() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(502);
    });

    let service = service_for(&server);
    let response = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "01310100"))
        .await;

    api_mock.assert();
    assert_eq!(response.status, 500);
    assert!(response.cache.is_none());

    let body = json_body(response.body);
    assert!(body["message"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_malformed_payload_is_500() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200).body("<html>maintenance</html>");
    });

    let service = service_for(&server);
    let response = service
        .dispatch(Endpoint::Postal, &QueryParams::new().with("cep", "01310100"))
        .await;

    assert_eq!(response.status, 500);
    let body = json_body(response.body);
    assert!(!body["message"].as_str().unwrap().is_empty());
}
