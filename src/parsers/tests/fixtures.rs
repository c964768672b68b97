//! Markup builders shaped like the guest job search API's result fragments

/// A well-formed listing item with every field present
pub(crate) fn listing_item(id: usize, title: &str, company: &str, location: &str) -> String {
    format!(
        r#"<li>
  <div class="base-card base-search-card job-search-card" data-entity-urn="urn:li:jobPosting:{id}">
    <a class="base-card__full-link" href="/jobs/view/{id}" data-tracking-control-name="public_jobs_jserp-result_search-card">
      <span class="sr-only">{title}</span>
    </a>
    <div class="base-search-card__info">
      <h3 class="base-search-card__title">
        {title}
      </h3>
      <h4 class="base-search-card__subtitle">
        <a class="hidden-nested-link" href="https://www.linkedin.com/company/acme">{company}</a>
      </h4>
      <div class="base-search-card__metadata">
        <span class="job-search-card__location" data-field="jobLocation">{location}</span>
        <time class="job-search-card__listdate" datetime="2024-05-{day:02}">2 days ago</time>
      </div>
    </div>
  </div>
</li>"#,
        day = (id % 28) + 1,
    )
}

/// A page of `count` well-formed items whose ids start at `first_id`
pub(crate) fn listing_page(first_id: usize, count: usize, location: &str) -> String {
    (first_id..first_id + count)
        .map(|id| listing_item(id, &format!("Backend Engineer {id}"), "Acme Corp", location))
        .collect::<Vec<_>>()
        .join("\n")
}
