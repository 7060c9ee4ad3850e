//! The single HTML page served at `/`.

use axum::response::Html;
use html_escape::encode_text;
use model::Label;

/// What the page shows under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome<'a> {
    #[default]
    Empty,
    Prediction(Label),
    Error(&'a str),
}

/// Render the review form, pre-filled with `review` when given.
pub fn render_index(review: Option<&str>, outcome: Outcome<'_>) -> Html<String> {
    let review = encode_text(review.unwrap_or_default());

    let result = match outcome {
        Outcome::Empty => String::new(),
        Outcome::Prediction(label) => format!(
            "<p class=\"prediction {}\">Predicted sentiment: <strong>{}</strong></p>",
            label.as_str(),
            encode_text(label.title())
        ),
        Outcome::Error(message) => format!("<p class=\"error\">{}</p>", encode_text(message)),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Review Sentiment</title>
</head>
<body>
  <h1>Review Sentiment</h1>
  <form method="post" action="/">
    <label for="review_text">Enter your review:</label><br>
    <textarea id="review_text" name="review_text" rows="6" cols="60">{review}</textarea><br>
    <button type="submit">Predict</button>
  </form>
  {result}
</body>
</html>
"#
    ))
}
