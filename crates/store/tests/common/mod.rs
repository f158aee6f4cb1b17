use serde_json::json;

/// A scan run of an overlay profile pair: `nginx-wrapper` extends
/// `nginx-baseline`, every baseline control reappears in the wrapper.
/// Three logical controls, six control instances per run.
pub fn nginx_run(failing: bool) -> String {
    let v2_results = if failing {
        json!([{"status": "failed", "code_desc": "File /etc/nginx/nginx.conf mode",
                "message": "expected 0644"}])
    } else {
        json!([{"status": "passed", "code_desc": "File /etc/nginx/nginx.conf mode"}])
    };

    json!({
        "version": "4.18.114",
        "platform": {"name": "ubuntu", "release": "20.04"},
        "statistics": {"duration": 3.2},
        "profiles": [
            {
                "name": "nginx-wrapper",
                "version": "1.1.0",
                "depends": [{"name": "nginx-baseline"}],
                "controls": [
                    {
                        "id": "V-1",
                        "title": "Worker processes must run unprivileged",
                        "impact": 0.5,
                        "tags": {"nist": ["AC-3"]},
                        "results": [{"status": "passed", "code_desc": "User nginx"}]
                    },
                    {
                        "id": "V-2",
                        "title": "Configuration files must be mode 0644",
                        "impact": 0.7,
                        "tags": {"nist": ["AU-12 c"]},
                        "results": v2_results
                    },
                    {
                        "id": "V-13613",
                        "title": "The web server must not be a proxy",
                        "code": "describe nginx_conf do\nend",
                        "impact": 0.9,
                        "tags": {"nist": ["AC-3 (1)"]},
                        "results": [{"status": "passed", "code_desc": "proxy off"}]
                    }
                ]
            },
            {
                "name": "nginx-baseline",
                "version": "1.0.0",
                "controls": [
                    {"id": "V-1", "impact": 0.5, "tags": {"nist": ["AC-3"]}, "results": []},
                    {"id": "V-2", "impact": 0.7, "tags": {"nist": ["AU-12 c"]}, "results": []},
                    {"id": "V-13613", "impact": 0.9, "tags": {"nist": ["AC-3 (1)"]}, "results": []}
                ]
            }
        ]
    })
    .to_string()
}

/// A standalone profile definition (no run results)
pub fn baseline_profile() -> String {
    json!({
        "name": "nginx-baseline",
        "version": "1.0.0",
        "controls": [
            {"id": "V-1", "title": "Worker processes must run unprivileged",
             "impact": 0.5, "tags": {"nist": ["AC-3"]}},
            {"id": "V-2", "title": "Configuration files must be mode 0644",
             "impact": 0.7, "tags": {"nist": ["AU-12 c"]}}
        ]
    })
    .to_string()
}
