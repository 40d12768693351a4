use crate::catalog::models::example_entry::ExampleEntry;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>OmniGen</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.columns { display: flex; gap: 2rem; }
.columns > div { flex: 1; }
label { display: block; margin-top: .6rem; }
textarea { width: 100%; min-height: 5rem; }
#output { max-width: 100%; border: 1px solid #ccc; min-height: 256px; }
table { border-collapse: collapse; margin-top: 2rem; width: 100%; }
td, th { border: 1px solid #ddd; padding: .3rem; font-size: .85rem; vertical-align: top; }
</style>
</head>
<body>
"#;

const FORM: &str = r#"<div class="columns">
<div>
<form id="generate">
<label>Prompt, use <code>&lt;img&gt;&lt;|image_i|&gt;&lt;/img&gt;</code> for the i-th input image
<textarea name="prompt" placeholder="Type your prompt here..."></textarea></label>
<label>&lt;img&gt;&lt;|image_1|&gt;&lt;/img&gt; <input type="file" name="image_1" accept="image/*"></label>
<label>&lt;img&gt;&lt;|image_2|&gt;&lt;/img&gt; <input type="file" name="image_2" accept="image/*"></label>
<label>&lt;img&gt;&lt;|image_3|&gt;&lt;/img&gt; <input type="file" name="image_3" accept="image/*"></label>
<label>Height <input type="range" name="height" min="128" max="2048" step="16" value="1024" oninput="this.nextElementSibling.value=this.value"><output>1024</output></label>
<label>Width <input type="range" name="width" min="128" max="2048" step="16" value="1024" oninput="this.nextElementSibling.value=this.value"><output>1024</output></label>
<label>Guidance Scale <input type="range" name="guidance_scale" min="1" max="5" step="0.1" value="2.5" oninput="this.nextElementSibling.value=this.value"><output>2.5</output></label>
<label>Image Guidance Scale <input type="range" name="img_guidance_scale" min="1" max="2" step="0.1" value="1.6" oninput="this.nextElementSibling.value=this.value"><output>1.6</output></label>
<label>Inference Steps <input type="range" name="inference_steps" min="1" max="100" step="1" value="50" oninput="this.nextElementSibling.value=this.value"><output>50</output></label>
<label>Seed <input type="number" name="seed" min="0" max="2147483647" value="42"></label>
<label><input type="checkbox" name="randomize_seed" checked> Randomize seed</label>
<label>Max input image size <input type="range" name="max_input_image_size" min="128" max="2048" step="16" value="1024" oninput="this.nextElementSibling.value=this.value"><output>1024</output></label>
<label><input type="checkbox" name="separate_cfg_infer" checked> Separate CFG inference (lower memory use)</label>
<label><input type="checkbox" name="offload_model"> Offload model to CPU (much lower memory use, slower)</label>
<label><input type="checkbox" name="use_input_image_size_as_output"> Use input image size as output size</label>
<label><input type="checkbox" name="save_images"> Save generated images</label>
<p><button type="submit">Generate Image</button></p>
</form>
</div>
<div>
<img id="output" alt="Generated Image">
<p id="status"></p>
</div>
</div>
"#;

const SCRIPT: &str = r#"<script>
const output = document.getElementById('output');
const status = document.getElementById('status');
async function show(res) {
  if (!res.ok) {
    const body = await res.json().catch(() => ({ message: res.statusText }));
    status.textContent = body.message;
    return;
  }
  output.src = URL.createObjectURL(await res.blob());
  const saved = res.headers.get('x-saved-path');
  status.textContent = 'seed ' + res.headers.get('x-seed') + (saved ? ', saved to ' + saved : '');
}
document.getElementById('generate').addEventListener('submit', async (e) => {
  e.preventDefault();
  status.textContent = 'generating...';
  show(await fetch('/generate', { method: 'POST', body: new FormData(e.target) }));
});
document.querySelectorAll('button[data-example]').forEach((button) => {
  button.addEventListener('click', async () => {
    status.textContent = 'generating...';
    show(await fetch('/examples/' + button.dataset.example, { method: 'POST' }));
  });
});
</script>
</body>
</html>
"#;

pub fn render_page(checkpoint: &str, examples: &[ExampleEntry]) -> String {
    let mut html = String::from(HEAD);

    html.push_str(&format!(
        "<h1>OmniGen: Unified Image Generation</h1>\n<p>Model: <code>{}</code>. \
         Pass a prompt and, for multi-modal generation, up to three input images. \
         Reference the i-th image in the prompt as <code>&lt;img&gt;&lt;|image_i|&gt;&lt;/img&gt;</code>.</p>\n",
        escape(checkpoint)
    ));
    html.push_str(FORM);
    html.push_str(&render_examples(examples));
    html.push_str(SCRIPT);

    html
}

fn render_examples(examples: &[ExampleEntry]) -> String {
    let mut html = String::from(
        "<table>\n<tr><th></th><th>Prompt</th><th>Images</th><th>Size</th><th>Guidance</th><th>Image Guidance</th><th>Seed</th></tr>\n",
    );

    for (index, example) in examples.iter().enumerate() {
        let images: Vec<String> = example.images.iter().flatten().map(|p| escape(p)).collect();
        let size = match (example.width, example.height) {
            (Some(width), Some(height)) => format!("{}x{}", width, height),
            _ => "input".to_string(),
        };

        html.push_str(&format!(
            "<tr><td><button type=\"button\" data-example=\"{}\">Run</button></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            index,
            escape(example.prompt),
            images.join("<br>"),
            size,
            example.guidance_scale,
            example.img_guidance_scale,
            example.seed,
        ));
    }

    html.push_str("</table>\n");
    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\n' => escaped.push_str("<br>"),
            _ => escaped.push(c),
        }
    }
    escaped
}
