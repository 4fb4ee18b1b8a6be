//! Server-rendered HTML pages.
//!
//! Pages are small enough to build with `format!`. Everything user-supplied
//! goes through [`escape_html`].

/// Sentence shown after a report request
pub const SAMPLE_REPORT: &str = "This is a sample psychological report based on your speech input.";

const FONT_LINK: &str = r#"<link href="https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;600&display=swap" rel="stylesheet">"#;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    {FONT_LINK}
    <style>
        body {{ font-family: 'Poppins', sans-serif; color: #333; }}
{style}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

const CARD_STYLE: &str = r#"
        body { margin: 0; background-color: #f0f4f8; display: flex; justify-content: center; align-items: center; min-height: 100vh; }
        .container { background: #ffffff; padding: 30px 40px; border-radius: 16px; box-shadow: 0 8px 30px rgba(0, 0, 0, 0.1); max-width: 600px; width: 90%; }
        h2 { font-weight: 600; margin-bottom: 20px; text-align: center; }
        label { display: block; margin-top: 14px; font-weight: 500; }
        input, select, textarea { width: 100%; padding: 8px; margin-top: 6px; border: 1px solid #ccd; border-radius: 8px; font-family: inherit; box-sizing: border-box; }
        pre { background-color: #f7f9fb; padding: 20px; border-radius: 10px; overflow-x: auto; color: #444; font-size: 15px; line-height: 1.6; white-space: pre-wrap; }
        button { margin-top: 20px; padding: 12px 24px; font-size: 16px; background-color: #007bff; color: white; border: none; border-radius: 10px; cursor: pointer; font-weight: 500; }
        button:hover { background-color: #0056b3; }
"#;

const LIST_STYLE: &str = r#"
        body { padding: 40px; background-color: #f7f9fb; }
        h2 { margin-bottom: 20px; }
        ul { background: #fff; border-radius: 10px; padding: 20px; list-style-type: none; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
        li { padding: 10px 0; border-bottom: 1px solid #eee; }
"#;

/// Intake questionnaire posting to `/analyze`
pub fn intake_page() -> String {
    let body = r#"<div class="container">
    <h2>Before We Begin</h2>
    <form action="/analyze" method="post">
        <label for="mood">How are you feeling today?</label>
        <select id="mood" name="mood">
            <option value="happy">Happy</option>
            <option value="sad">Sad</option>
            <option value="anxious">Anxious</option>
            <option value="angry">Angry</option>
            <option value="confused">Confused</option>
            <option value="calm">Calm</option>
        </select>

        <label for="therapy">Have you been in therapy before?</label>
        <select id="therapy" name="therapy">
            <option value="no">No</option>
            <option value="yes">Yes</option>
        </select>

        <label for="animal">If you were an animal, which would you be?</label>
        <input id="animal" name="animal" type="text" placeholder="owl, dolphin, lion...">

        <label for="reason">What brings you here today?</label>
        <textarea id="reason" name="reason" rows="2"></textarea>

        <label for="struggles">What are you struggling with lately?</label>
        <textarea id="struggles" name="struggles" rows="2"></textarea>

        <label for="symptoms">Any symptoms you've noticed?</label>
        <textarea id="symptoms" name="symptoms" rows="2"></textarea>

        <button type="submit">Analyze</button>
    </form>
</div>"#;
    page("Intake", CARD_STYLE, body)
}

/// Result page for a submitted intake form
pub fn analysis_page(summary: &str) -> String {
    let body = format!(
        r#"<div class="container">
    <h2>Initial Analysis</h2>
    <pre>{}</pre>
    <form action="/video">
        <button type="submit">Start Video Session</button>
    </form>
</div>"#,
        escape_html(summary)
    );
    page("Initial Analysis", CARD_STYLE, &body)
}

/// Live session page. Webcam and microphone capture happen in the browser,
/// which posts snapshots and clips to the JSON endpoints.
pub fn video_page() -> String {
    let body = r#"<div class="container">
    <h2>Video Session</h2>
    <video id="camera" autoplay muted playsinline width="100%"></video>
    <canvas id="frame" style="display:none"></canvas>
    <p>Face: <strong id="face">-</strong></p>
    <p>Voice: <strong id="voice">-</strong></p>
    <p id="transcript"></p>
    <pre id="suggestion">Start talking whenever you're ready.</pre>
    <button id="record">Record 5s of speech</button>
    <p><a href="/emotion_log">Emotion log</a> · <a href="/transcript_log">Transcript log</a> · <a href="/getreport">Report</a></p>
</div>
<script>
const video = document.getElementById('camera');
const canvas = document.getElementById('frame');
let stream;

async function snapshot() {
    if (!video.videoWidth) return;
    canvas.width = video.videoWidth;
    canvas.height = video.videoHeight;
    canvas.getContext('2d').drawImage(video, 0, 0);
    const res = await fetch('/analyze_emotion', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({image: canvas.toDataURL('image/jpeg')})
    });
    const data = await res.json();
    document.getElementById('face').textContent = data.emotion || data.error;
    refreshSuggestion();
}

async function refreshSuggestion() {
    const res = await fetch('/get_suggestion');
    const data = await res.json();
    document.getElementById('suggestion').textContent = data.suggestion;
}

document.getElementById('record').onclick = () => {
    const recorder = new MediaRecorder(new MediaStream(stream.getAudioTracks()));
    const chunks = [];
    recorder.ondataavailable = e => chunks.push(e.data);
    recorder.onstop = async () => {
        const form = new FormData();
        form.append('audio', new Blob(chunks, {type: recorder.mimeType}), 'speech.webm');
        const res = await fetch('/analyze_voice', {method: 'POST', body: form});
        const data = await res.json();
        if (data.error) {
            document.getElementById('voice').textContent = data.error;
            return;
        }
        document.getElementById('voice').textContent = data.emotion;
        document.getElementById('transcript').textContent = '"' + data.transcript + '"';
        document.getElementById('suggestion').textContent = data.suggestion;
    };
    recorder.start();
    setTimeout(() => recorder.stop(), 5000);
};

navigator.mediaDevices.getUserMedia({video: true, audio: true}).then(s => {
    stream = s;
    video.srcObject = s;
    setInterval(snapshot, 5000);
});
</script>"#;
    page("Video Session", CARD_STYLE, body)
}

/// Bulleted list of log lines
pub fn log_list_page(title: &str, heading: &str, lines: &[String]) -> String {
    let items: String = lines
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();
    let body = format!("<h2>{}</h2>\n<ul>\n{}\n</ul>", escape_html(heading), items);
    page(&escape_html(title), LIST_STYLE, &body)
}

/// Report page; `report` is shown once one has been requested
pub fn report_page(report: Option<&str>) -> String {
    let content = match report {
        Some(text) => format!("<pre>{}</pre>", escape_html(text)),
        None => "<p>Request a report of this session.</p>".to_string(),
    };
    let body = format!(
        r#"<div class="container">
    <h2>Session Report</h2>
    {}
    <form action="/getreport" method="post">
        <button type="submit">Generate Report</button>
    </form>
</div>"#,
        content
    );
    page("Session Report", CARD_STYLE, &body)
}
