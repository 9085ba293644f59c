/// トップページのHTMLを作成する
///
/// 経費の入力フォーム・一覧・統計・グラフを1ページで表示する。
/// データはすべて`/api/*`から取得する。
pub fn create_index_html() -> String {
    r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Family Trip Expenses</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 2rem;
            background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%);
            color: #222;
        }
        .card {
            background: white;
            border-radius: 1rem;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1);
        }
        .stats { display: flex; gap: 2rem; }
        form { display: grid; grid-template-columns: repeat(5, 1fr) auto; gap: 0.5rem; }
        table { width: 100%; border-collapse: collapse; }
        td, th { padding: 0.4rem; border-bottom: 1px solid #eee; text-align: left; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Family Trip Expenses</h1>
        <form id="expense-form">
            <input name="date" type="date" required>
            <input name="amount" type="number" step="0.01" placeholder="Amount" required>
            <input name="category" placeholder="Category" required>
            <input name="place" placeholder="Place" required>
            <input name="description" placeholder="Description" required>
            <button type="submit">Add</button>
        </form>
    </div>
    <div class="card stats">
        <div>Total: <strong id="total-spent">0</strong></div>
        <div>Daily average: <strong id="daily-average">0</strong></div>
        <div>Expenses: <strong id="total-expenses">0</strong></div>
        <div>Top category: <strong id="top-category">-</strong></div>
        <div><a href="/api/export">Export CSV</a></div>
    </div>
    <div class="card"><div id="category-chart"></div><div id="daily-chart"></div></div>
    <div class="card"><table><tbody id="expense-rows"></tbody></table></div>
    <script>
        async function refresh() {
            const expenses = await (await fetch('/api/expenses')).json();
            const rows = document.getElementById('expense-rows');
            rows.innerHTML = '';
            for (const e of expenses) {
                const tr = document.createElement('tr');
                for (const value of [e.date, e.amount.toFixed(2), e.category, e.place, e.description]) {
                    const td = document.createElement('td');
                    td.textContent = value;
                    tr.appendChild(td);
                }
                const button = document.createElement('button');
                button.textContent = 'Delete';
                button.onclick = async () => {
                    await fetch('/api/expenses/' + e.id, { method: 'DELETE' });
                    refresh();
                };
                tr.appendChild(button);
                rows.appendChild(tr);
            }

            const stats = await (await fetch('/api/stats')).json();
            document.getElementById('total-spent').textContent = stats.total_spent;
            document.getElementById('daily-average').textContent = stats.daily_average;
            document.getElementById('total-expenses').textContent = stats.total_expenses;
            document.getElementById('top-category').textContent = stats.top_category;

            const charts = await (await fetch('/api/charts')).json();
            for (const [key, id] of [['category_chart', 'category-chart'], ['daily_chart', 'daily-chart']]) {
                if (charts[key]) {
                    const figure = JSON.parse(charts[key]);
                    Plotly.newPlot(id, figure.data, figure.layout);
                } else {
                    Plotly.purge(id);
                }
            }
        }

        document.getElementById('expense-form').addEventListener('submit', async (event) => {
            event.preventDefault();
            const body = Object.fromEntries(new FormData(event.target));
            const result = await (await fetch('/api/expenses', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            })).json();
            if (!result.success) {
                alert(result.error);
                return;
            }
            event.target.reset();
            refresh();
        });

        refresh();
    </script>
</body>
</html>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_index_html() {
        let html = create_index_html();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("/api/expenses"));
        assert!(html.contains("/api/export"));
    }
}
