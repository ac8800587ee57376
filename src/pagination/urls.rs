/// Build paginated URL with ?page= parameter
pub fn build_paginated_url(base_url: &str, page: usize, per_page: usize) -> String {
    build_paginated_url_with_params(base_url, &[], page, per_page)
}

/// Build paginated URL with extra query parameters, URL-encoding their values.
/// Page 1 is sent explicitly.
pub fn build_paginated_url_with_params(
    base_url: &str,
    params: &[(&str, &str)],
    page: usize,
    per_page: usize,
) -> String {
    let mut url = base_url.to_string();
    for (key, value) in params {
        push_param(&mut url, key, &urlencoding::encode(value));
    }
    push_param(&mut url, "page", &page.to_string());
    push_param(&mut url, "per_page", &per_page.to_string());
    url
}

fn push_param(url: &mut String, key: &str, value: &str) {
    url.push(determine_separator(url));
    url.push_str(key);
    url.push('=');
    url.push_str(value);
}

fn determine_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}
